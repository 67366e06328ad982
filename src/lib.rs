#![forbid(unsafe_code)]

//! # bruker-opus-rs
//!
//! A Rust library for decoding Bruker OPUS spectroscopy files.
//!
//! An OPUS file is a binary container: a fixed 504-byte header holding a
//! directory of block descriptors, followed by the block bodies. Each body is
//! free text, a table of typed parameters, or a series of float samples.
//!
//! ## Features
//!
//! - **Directory walking**: Read the header directory into [`blocks::BlockDescriptor`]s
//! - **Block resolution**: Name blocks ("AB", "ScSm", "Optik", ...) from their type codes
//! - **Body decoding**: Text, parameter tables and numeric series
//! - **Tolerant assembly**: Unknown or corrupt blocks are skipped, duplicates are numbered
//! - **JSON export**: Dump decoded blocks with the `json` feature
//!
//! ## Quick Start
//!
//! ```no_run
//! use bruker_opus_rs::{OpusData, Result};
//!
//! fn main() -> Result<()> {
//!     let bytes = std::fs::read("sample.0").expect("readable file");
//!     let opus = OpusData::from_bytes(bytes)?;
//!
//!     for name in opus.names() {
//!         println!("Block: {}", name);
//!     }
//!
//!     if let (Some(ab), Some(params)) = (opus.series("AB"), opus.parameters("AB Data Parameter")) {
//!         println!("{} samples, NPT = {:?}", ab.len(), params.get_int("NPT"));
//!     }
//!
//!     for skipped in opus.skipped() {
//!         println!("Skipped {:?}: {}", skipped.reason, skipped.error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`blocks`] | Header layout, field readers, block resolution and body decoders |
//! | [`parsing`] | Whole-file assembly into a name -> block mapping |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T>`]. Decoding a file only fails
//! when the buffer is shorter than the header; per-block problems are
//! collected in [`OpusData::skipped`].

pub mod blocks;
pub mod parsing;

mod opus;
mod types;

pub mod error;

// Re-export commonly used types at the crate root
pub use blocks::{BlockDescriptor, BodyKind, NumericSeries, ParameterTable, ParameterValue};
pub use error::{Error, Result};
pub use opus::OpusData;
pub use parsing::SkippedBlock;
pub use types::{BlockContent, SkipReason};

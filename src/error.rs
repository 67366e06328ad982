//! Error types for OPUS decoding.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur while walking the directory of an OPUS file or decoding one of
//! its blocks.
//!
//! Only a header shorter than the fixed 504 bytes aborts a decode. Every other
//! variant is local to one block: the container assembler catches it, records
//! the block as skipped and moves on (see [`Error::is_block_local`]).
//!
//! # Example
//!
//! ```no_run
//! use bruker_opus_rs::{Error, OpusData, Result};
//!
//! fn load(bytes: Vec<u8>) -> Result<()> {
//!     match OpusData::from_bytes(bytes) {
//!         Ok(opus) => {
//!             println!("Decoded {} blocks", opus.len());
//!             Ok(())
//!         }
//!         Err(Error::TooShortBuffer { actual, .. }) => {
//!             eprintln!("Not an OPUS file: only {} bytes", actual);
//!             Ok(())
//!         }
//!         Err(e) => Err(e),
//!     }
//! }
//! ```

use core::fmt;

/// Errors that can occur during OPUS file decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Buffer provided for parsing was too small.
    ///
    /// Raised when the file is shorter than the fixed-size header.
    TooShortBuffer {
        /// Actual number of bytes available
        actual: usize,
        /// Minimum number of bytes required
        expected: usize,
        /// Source file where the error was detected
        file: &'static str,
        /// Line number where the error was detected
        line: u32,
    },

    /// A fixed-width field or a block body extends past the end of the buffer.
    OutOfRange {
        /// Offset of the first byte of the read
        offset: usize,
        /// Number of bytes requested
        width: usize,
        /// Length of the buffer being read
        len: usize,
    },

    /// The composite type key of a directory entry matches no known block.
    ///
    /// This includes keys whose `data_kind` is known but whose `channel_kind`
    /// is missing from that kind's name table.
    UnresolvedBlockKind {
        /// Primary category byte of the entry
        data_kind: u8,
        /// Acquisition channel byte of the entry
        channel_kind: u8,
        /// Text sub-kind byte, only meaningful for text blocks
        text_kind: u8,
    },

    /// A block body could not be decoded (truncated record, unknown
    /// parameter type, misaligned series, ...).
    BodyDecodeFailure {
        /// The resolved name of the block
        block: String,
        /// Human-readable description of the problem
        reason: String,
    },

    /// Failed to serialize decoded blocks.
    SerializationError(String),
}

impl Error {
    /// Returns `true` for errors that only invalidate a single block.
    ///
    /// These are swallowed by the container assembler; anything else aborts
    /// the decode.
    pub fn is_block_local(&self) -> bool {
        matches!(
            self,
            Error::OutOfRange { .. }
                | Error::UnresolvedBlockKind { .. }
                | Error::BodyDecodeFailure { .. }
        )
    }

    pub(crate) fn body(block: &str, reason: impl Into<String>) -> Self {
        Error::BodyDecodeFailure {
            block: block.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooShortBuffer {
                actual,
                expected,
                file,
                line,
            } => write!(
                f,
                "Buffer too small at {file}:{line}: need at least {expected} bytes, got {actual}"
            ),
            Error::OutOfRange { offset, width, len } => write!(
                f,
                "Read of {width} bytes at offset {offset} exceeds buffer of {len} bytes"
            ),
            Error::UnresolvedBlockKind {
                data_kind,
                channel_kind,
                text_kind,
            } => write!(
                f,
                "Unknown block kind: data={data_kind}, channel={channel_kind}, text={text_kind}"
            ),
            Error::BodyDecodeFailure { block, reason } => {
                write!(f, "Failed to decode block {block:?}: {reason}")
            }
            Error::SerializationError(s) => write!(f, "Serialization error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized Result type for OPUS operations.
pub type Result<T> = core::result::Result<T, Error>;

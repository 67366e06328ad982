// src/blocks/mod.rs

// ============================================================================
// Format Constants
// ============================================================================
// Fixed layout of the OPUS header and its block directory. Block bodies are
// variable-length and located through directory entries.

/// Length of the fixed file header (504 bytes) holding the block directory.
pub const HEADER_LEN: usize = 504;

/// Offset of the first directory record within the header.
pub const DIRECTORY_START: usize = 24;

/// Size of one directory record (12 bytes).
pub const DIRECTORY_RECORD_SIZE: usize = 12;

/// Block bodies are measured in 4-byte chunks.
pub const CHUNK_SIZE: usize = 4;

// ============================================================================
// Submodules
// ============================================================================

mod block_type;
mod common;
mod directory;
mod parameter_block;
mod series_block;
mod text_block;

// Re-export field readers
pub use common::{
    body_range, decode_string, read_f32, read_f64, read_i32, read_u8, read_u16, read_u32,
};

// Re-export block types
pub use block_type::{BodyKind, ResolvedBlock, resolve_kind};
pub use directory::{BlockDescriptor, walk_directory};
pub use parameter_block::{
    ParameterEntry, ParameterKind, ParameterTable, ParameterValue, decode_parameter_entries,
};
pub use series_block::{NumericSeries, SAMPLE_WIDTH};
pub use text_block::TextBlock;

use super::directory::BlockDescriptor;
use crate::{
    Result,
    blocks::common::{body_range, decode_string, trim_trailing_nuls},
};

/// A free-text block, e.g. "History" or "Text Information".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
}

impl TextBlock {
    /// Decode the text body described by `descriptor`.
    ///
    /// Trailing NUL padding is stripped. Bytes that are not valid UTF-8 are
    /// decoded as Latin-1, so only an out-of-range body can fail.
    pub fn from_descriptor(data: &[u8], descriptor: &BlockDescriptor) -> Result<Self> {
        let range = body_range(data.len(), descriptor.byte_offset, descriptor.chunk_count)?;
        Ok(Self::from_body(&data[range]))
    }

    /// Decode an already sliced text body.
    pub fn from_body(body: &[u8]) -> Self {
        Self {
            text: decode_string(trim_trailing_nuls(body)),
        }
    }
}

use super::ContainerBuilder;
use crate::{
    Error, Result,
    blocks::{
        BlockDescriptor, BodyKind, NumericSeries, ParameterTable, ResolvedBlock, TextBlock,
        walk_directory,
    },
    types::{BlockContent, SkipReason},
};
use indexmap::IndexMap;
use log::{debug, info, warn};

/// A directory entry that did not make it into the decoded result.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    pub descriptor: BlockDescriptor,
    /// Resolved name, when resolution succeeded and decoding failed.
    pub name: Option<&'static str>,
    pub reason: SkipReason,
    pub error: Error,
}

#[derive(Debug, Clone)]
pub struct OpusFile {
    /// Directory entries in header order.
    pub descriptors: Vec<BlockDescriptor>,
    /// Decoded blocks keyed by unique name, in directory order.
    pub blocks: IndexMap<String, BlockContent>,
    /// Entries that were walked but not decoded.
    pub skipped: Vec<SkippedBlock>,
}

impl OpusFile {
    /// Decode an OPUS file from a byte buffer.
    ///
    /// # Arguments
    /// * `data` - Complete file contents.
    ///
    /// # Returns
    /// An [`OpusFile`] with every block that could be decoded, or
    /// [`Error::TooShortBuffer`] when `data` is shorter than the header.
    /// Unknown or corrupt blocks are recorded in [`OpusFile::skipped`].
    pub fn parse_from_bytes(data: &[u8]) -> Result<Self> {
        let descriptors = walk_directory(data)?;

        let mut builder = ContainerBuilder::new();
        let mut skipped = Vec::new();
        for descriptor in &descriptors {
            let resolved = match ResolvedBlock::resolve(*descriptor) {
                Ok(resolved) => resolved,
                Err(error) => {
                    debug!("Skipping directory entry: {}", error);
                    skipped.push(SkippedBlock {
                        descriptor: *descriptor,
                        name: None,
                        reason: SkipReason::Unresolved,
                        error,
                    });
                    continue;
                }
            };

            match decode_body(data, &resolved) {
                Ok(content) => {
                    let key = builder.insert(resolved.name, content);
                    debug!(
                        "Decoded block {:?} ({:?}, {} bytes at {})",
                        key,
                        resolved.body_kind,
                        descriptor.body_len(),
                        descriptor.byte_offset
                    );
                }
                Err(error) => {
                    warn!("Skipping block {:?}: {}", resolved.name, error);
                    skipped.push(SkippedBlock {
                        descriptor: *descriptor,
                        name: Some(resolved.name),
                        reason: SkipReason::DecodeFailure,
                        error,
                    });
                }
            }
        }

        info!(
            "Decoded {} of {} OPUS blocks ({} skipped)",
            builder.len(),
            descriptors.len(),
            skipped.len()
        );

        Ok(Self {
            descriptors,
            blocks: builder.finish(),
            skipped,
        })
    }
}

/// Run the body decoder selected for `block`.
///
/// An out-of-range body is reported as a decode failure of that block.
fn decode_body(data: &[u8], block: &ResolvedBlock) -> Result<BlockContent> {
    decode_content(data, block).map_err(|e| match e {
        Error::OutOfRange { .. } => Error::body(block.name, e.to_string()),
        other => other,
    })
}

fn decode_content(data: &[u8], block: &ResolvedBlock) -> Result<BlockContent> {
    let descriptor = &block.descriptor;
    let content = match block.body_kind {
        BodyKind::Text => {
            let text_block = TextBlock::from_descriptor(data, descriptor)?;
            BlockContent::Text(text_block.text)
        }
        BodyKind::ParameterTable => {
            let table = ParameterTable::from_descriptor(data, descriptor, block.name)?;
            BlockContent::Parameters(table)
        }
        BodyKind::NumericSeries => {
            let series = NumericSeries::from_descriptor(data, descriptor, block.name)?;
            BlockContent::Series(series)
        }
    };
    Ok(content)
}

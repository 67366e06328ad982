// directory.rs
use super::{CHUNK_SIZE, DIRECTORY_RECORD_SIZE, DIRECTORY_START, HEADER_LEN};
use crate::{
    Result,
    blocks::common::{read_i32, read_u8, read_u32, validate_buffer_size},
};
use log::{debug, trace};

/// One entry of the OPUS block directory.
///
/// The directory lives in the fixed 504-byte header and describes where each
/// block body is stored and how to classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockDescriptor {
    /// Broad category of the block (text, sample series, parameters, ...).
    pub data_kind: u8,
    /// Disambiguates within a data kind, e.g. sample vs. reference channel.
    pub channel_kind: u8,
    /// Disambiguates generic text sub-blocks.
    pub text_kind: u8,
    /// Extra classification byte. Not part of block resolution.
    pub additional_kind: u8,
    /// Number of 4-byte words in the block body.
    pub chunk_count: u32,
    /// Absolute offset of the block body. Always positive.
    pub byte_offset: usize,
}

impl BlockDescriptor {
    /// Length of the block body in bytes.
    #[inline]
    pub fn body_len(&self) -> usize {
        self.chunk_count as usize * CHUNK_SIZE
    }

    /// Offset one past the last byte of the block body.
    #[inline]
    pub fn body_end(&self) -> usize {
        self.byte_offset.saturating_add(self.body_len())
    }

    /// Parse one 12-byte directory record.
    ///
    /// # Structure (12 bytes):
    /// - data kind: 1 byte
    /// - channel kind: 1 byte
    /// - text kind: 1 byte
    /// - additional kind: 1 byte
    /// - chunk count: 4 bytes (u32)
    /// - body offset: 4 bytes (i32)
    ///
    /// # Returns
    /// `Ok(None)` for a terminator record (body offset `<= 0`).
    pub fn from_record(header: &[u8], cursor: usize) -> Result<Option<Self>> {
        let byte_offset = read_i32(header, cursor + 8)?;
        if byte_offset <= 0 {
            return Ok(None);
        }

        Ok(Some(Self {
            data_kind: read_u8(header, cursor)?,
            channel_kind: read_u8(header, cursor + 1)?,
            text_kind: read_u8(header, cursor + 2)?,
            additional_kind: read_u8(header, cursor + 3)?,
            chunk_count: read_u32(header, cursor + 4)?,
            byte_offset: byte_offset as usize,
        }))
    }
}

/// Walk the header directory and collect block descriptors in directory order.
///
/// The walk stops at the end of the header, at the first entry with a
/// non-positive body offset (not included) or after the first entry whose body
/// reaches the end of the file (included).
///
/// # Returns
/// The descriptors on success or [`crate::Error::TooShortBuffer`] when `data`
/// is shorter than the header.
pub fn walk_directory(data: &[u8]) -> Result<Vec<BlockDescriptor>> {
    validate_buffer_size(data, HEADER_LEN)?;
    let header = &data[..HEADER_LEN];

    let mut descriptors = Vec::new();
    let mut cursor = DIRECTORY_START;
    while cursor + DIRECTORY_RECORD_SIZE <= HEADER_LEN {
        let Some(descriptor) = BlockDescriptor::from_record(header, cursor)? else {
            trace!("Directory terminator at header offset {}", cursor);
            break;
        };
        debug!(
            "Directory entry {}: data={} channel={} text={} chunks={} offset={}",
            descriptors.len(),
            descriptor.data_kind,
            descriptor.channel_kind,
            descriptor.text_kind,
            descriptor.chunk_count,
            descriptor.byte_offset
        );
        descriptors.push(descriptor);

        // Files commonly end exactly at the last block body.
        if descriptor.body_end() >= data.len() {
            break;
        }
        cursor += DIRECTORY_RECORD_SIZE;
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn record(header: &mut [u8], index: usize, kinds: [u8; 4], chunks: u32, offset: i32) {
        let at = DIRECTORY_START + index * DIRECTORY_RECORD_SIZE;
        header[at..at + 4].copy_from_slice(&kinds);
        header[at + 4..at + 8].copy_from_slice(&chunks.to_le_bytes());
        header[at + 8..at + 12].copy_from_slice(&offset.to_le_bytes());
    }

    #[test]
    fn short_header_is_rejected() {
        let err = walk_directory(&[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            Error::TooShortBuffer {
                actual: 100,
                expected: 504,
                ..
            }
        ));
    }

    #[test]
    fn empty_directory() -> Result<()> {
        assert!(walk_directory(&[0u8; HEADER_LEN])?.is_empty());
        Ok(())
    }

    #[test]
    fn stops_at_first_non_positive_offset() -> Result<()> {
        let mut data = vec![0u8; 600];
        record(&mut data, 0, [15, 0, 0, 0], 2, 504);
        record(&mut data, 1, [15, 0, 0, 0], 2, -4);
        record(&mut data, 2, [15, 0, 0, 0], 2, 512);
        let descriptors = walk_directory(&data)?;
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].byte_offset, 504);
        Ok(())
    }

    #[test]
    fn stops_after_block_reaching_end_of_file() -> Result<()> {
        let mut data = vec![0u8; 520];
        record(&mut data, 0, [15, 0, 0, 0], 2, 504);
        // Ends exactly at the file length, so this is the last one read.
        record(&mut data, 1, [7, 4, 0, 0], 2, 512);
        record(&mut data, 2, [7, 8, 0, 0], 1, 508);
        let descriptors = walk_directory(&data)?;
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].data_kind, 7);
        assert_eq!(descriptors[1].body_end(), 520);
        Ok(())
    }

    #[test]
    fn reads_every_record_field() -> Result<()> {
        let mut data = vec![0u8; 1000];
        record(&mut data, 0, [0, 1, 104, 9], 3, 504);
        let descriptors = walk_directory(&data)?;
        assert_eq!(
            descriptors[0],
            BlockDescriptor {
                data_kind: 0,
                channel_kind: 1,
                text_kind: 104,
                additional_kind: 9,
                chunk_count: 3,
                byte_offset: 504,
            }
        );
        Ok(())
    }

    #[test]
    fn full_directory_is_bounded_by_header() -> Result<()> {
        let mut data = vec![0u8; 4096];
        let slots = (HEADER_LEN - DIRECTORY_START) / DIRECTORY_RECORD_SIZE;
        for i in 0..slots {
            record(&mut data, i, [32, 0, 0, 0], 1, 504 + 4 * i as i32);
        }
        assert_eq!(walk_directory(&data)?.len(), slots);
        Ok(())
    }
}

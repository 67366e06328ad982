use super::directory::BlockDescriptor;
use crate::{
    Error, Result,
    blocks::common::{body_range, read_f32},
};

/// Width of one stored sample in bytes (little-endian f32).
pub const SAMPLE_WIDTH: usize = 4;

/// A flat run of samples, e.g. a single-channel spectrum or interferogram.
///
/// Samples are returned exactly as stored; no scaling is applied.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NumericSeries {
    samples: Vec<f32>,
}

impl NumericSeries {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    /// Decode the series body described by `descriptor`.
    pub fn from_descriptor(data: &[u8], descriptor: &BlockDescriptor, block: &str) -> Result<Self> {
        let range = body_range(data.len(), descriptor.byte_offset, descriptor.chunk_count)?;
        Self::from_body(block, &data[range])
    }

    /// Decode an already sliced series body.
    ///
    /// The body length must be an exact multiple of [`SAMPLE_WIDTH`].
    pub fn from_body(block: &str, body: &[u8]) -> Result<Self> {
        if body.len() % SAMPLE_WIDTH != 0 {
            return Err(Error::body(
                block,
                format!(
                    "series body of {} bytes is not a multiple of {} bytes",
                    body.len(),
                    SAMPLE_WIDTH
                ),
            ));
        }

        let samples = (0..body.len())
            .step_by(SAMPLE_WIDTH)
            .map(|offset| read_f32(body, offset))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { samples })
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn into_inner(self) -> Vec<f32> {
        self.samples
    }
}

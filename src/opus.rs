use crate::{
    Result,
    blocks::{BlockDescriptor, NumericSeries, ParameterTable},
    parsing::{OpusFile, SkippedBlock},
    types::BlockContent,
};

/// High level representation of a decoded OPUS file.
///
/// Maps unique block names ("AB", "AB Data Parameter", "Optik", ...) to their
/// contents in directory order. Blocks of unknown kind or with a corrupt body
/// are left out, so any expected name may be absent.
#[derive(Debug, Clone)]
pub struct OpusData {
    raw: OpusFile,
}

impl OpusData {
    /// Decode an OPUS file from its complete contents.
    ///
    /// # Returns
    /// A new [`OpusData`] on success or [`crate::Error::TooShortBuffer`] when
    /// the buffer cannot hold an OPUS header.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let raw = OpusFile::parse_from_bytes(data)?;
        Ok(Self { raw })
    }

    /// Same as [`OpusData::parse`], taking ownership of the buffer.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::parse(&data)
    }

    /// Access the raw decoding result.
    ///
    /// Useful for debugging or advanced use cases.
    pub fn raw(&self) -> &OpusFile {
        &self.raw
    }

    pub fn get(&self, name: &str) -> Option<&BlockContent> {
        self.raw.blocks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.raw.blocks.contains_key(name)
    }

    /// Text of a text block, or `None` if absent or not text.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(BlockContent::as_text)
    }

    /// A parameter table, e.g. `opus.parameters("AB Data Parameter")`.
    pub fn parameters(&self, name: &str) -> Option<&ParameterTable> {
        self.get(name).and_then(BlockContent::as_parameters)
    }

    /// A numeric series, e.g. `opus.series("AB")`.
    pub fn series(&self, name: &str) -> Option<&NumericSeries> {
        self.get(name).and_then(BlockContent::as_series)
    }

    /// Block names in directory order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.raw.blocks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BlockContent)> {
        self.raw
            .blocks
            .iter()
            .map(|(name, content)| (name.as_str(), content))
    }

    pub fn len(&self) -> usize {
        self.raw.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.blocks.is_empty()
    }

    /// Directory entries as found in the header.
    pub fn descriptors(&self) -> &[BlockDescriptor] {
        &self.raw.descriptors
    }

    /// Directory entries that were not decoded, with the reason.
    pub fn skipped(&self) -> &[SkippedBlock] {
        &self.raw.skipped
    }

    /// Serialize the decoded blocks to a JSON object keyed by block name.
    ///
    /// Requires the `json` feature.
    #[cfg(feature = "json")]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.raw.blocks).map_err(|e| {
            crate::Error::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }

    /// Pretty-printed variant of [`OpusData::to_json`].
    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.raw.blocks).map_err(|e| {
            crate::Error::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }

    /// Write the JSON form of the decoded blocks to `writer`.
    #[cfg(feature = "json")]
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer(writer, &self.raw.blocks).map_err(|e| {
            crate::Error::SerializationError(format!("JSON serialization failed: {}", e))
        })
    }
}

impl<'a> IntoIterator for &'a OpusData {
    type Item = (&'a String, &'a BlockContent);
    type IntoIter = indexmap::map::Iter<'a, String, BlockContent>;

    fn into_iter(self) -> Self::IntoIter {
        self.raw.blocks.iter()
    }
}

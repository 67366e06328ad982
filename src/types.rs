//! Shared types used across the library.

use crate::blocks::{BodyKind, NumericSeries, ParameterTable};

/// The decoded body of one block.
///
/// With the `serde` feature this serializes without a variant tag: text as a
/// string, parameters as a tag -> value object and series as an array.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum BlockContent {
    /// Free text with padding stripped
    Text(String),
    /// Typed parameter records
    Parameters(ParameterTable),
    /// Raw float samples
    Series(NumericSeries),
}

impl BlockContent {
    /// The decoder kind that produced this content.
    pub fn body_kind(&self) -> BodyKind {
        match self {
            BlockContent::Text(_) => BodyKind::Text,
            BlockContent::Parameters(_) => BodyKind::ParameterTable,
            BlockContent::Series(_) => BodyKind::NumericSeries,
        }
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, BlockContent::Text(_))
    }

    #[inline]
    pub fn is_parameters(&self) -> bool {
        matches!(self, BlockContent::Parameters(_))
    }

    #[inline]
    pub fn is_series(&self) -> bool {
        matches!(self, BlockContent::Series(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            BlockContent::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_parameters(&self) -> Option<&ParameterTable> {
        match self {
            BlockContent::Parameters(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_series(&self) -> Option<&NumericSeries> {
        match self {
            BlockContent::Series(s) => Some(s),
            _ => None,
        }
    }
}

/// Why a directory entry is missing from the decoded result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkipReason {
    /// The type key matches no known block kind.
    Unresolved,
    /// The kind is known but its body is corrupt or out of range.
    DecodeFailure,
}

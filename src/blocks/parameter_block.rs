// parameter_block.rs
//! Typed parameter tables ("Acquisition", "AB Data Parameter", ...).
//!
//! A parameter body is a sequence of records:
//!
//! ```text
//! [3 bytes] tag, ASCII characters, NUL padded when shorter
//! [1 byte]  reserved, ignored
//! [2 bytes] type code (u16): 0 = i32, 1 = f64, 2..=4 = string
//! [2 bytes] payload length in 2-byte words (u16)
//! [N bytes] payload, N = 2 * length
//! ```
//!
//! The table ends at an `END` tag, at an empty tag or when no full record
//! header fits in the remaining body.

use super::directory::BlockDescriptor;
use crate::{
    Error, Result,
    blocks::common::{body_range, decode_string, read_f64, read_i32, read_u16, trim_trailing_nuls},
};
use indexmap::IndexMap;
use log::trace;

/// Size of the fixed part of a parameter record (tag, type, length).
const RECORD_HEADER_SIZE: usize = 8;
const TAG_SIZE: usize = 3;
const END_TAG: &str = "END";

/// Semantic type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    Int,
    Float,
    Str,
}

impl ParameterKind {
    /// Map an on-disk type code to its kind. Unknown codes yield `None`.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(ParameterKind::Int),
            1 => Some(ParameterKind::Float),
            2..=4 => Some(ParameterKind::Str),
            _ => None,
        }
    }
}

impl core::fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParameterKind::Int => write!(f, "int"),
            ParameterKind::Float => write!(f, "float"),
            ParameterKind::Str => write!(f, "str"),
        }
    }
}

/// A decoded parameter value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ParameterValue {
    Int(i32),
    Float(f64),
    Str(String),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterValue::Int(_) => ParameterKind::Int,
            ParameterValue::Float(_) => ParameterKind::Float,
            ParameterValue::Str(_) => ParameterKind::Str,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParameterValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParameterValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to f64, useful for numeric operations.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParameterValue::Int(v) => Some(*v as f64),
            ParameterValue::Float(v) => Some(*v),
            ParameterValue::Str(_) => None,
        }
    }
}

/// One record of a parameter table.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub tag: String,
    pub value: ParameterValue,
}

impl ParameterEntry {
    #[inline]
    pub fn kind(&self) -> ParameterKind {
        self.value.kind()
    }
}

/// Decode the parameter records of a body slice, in on-disk order.
///
/// Repeated tags are returned as they appear.
///
/// # Arguments
/// * `block` - Block name, used in error messages.
/// * `body` - The exact bytes of the block body.
pub fn decode_parameter_entries(block: &str, body: &[u8]) -> Result<Vec<ParameterEntry>> {
    let mut entries = Vec::new();
    let mut cursor = 0usize;

    while cursor + RECORD_HEADER_SIZE <= body.len() {
        let tag = decode_string(trim_trailing_nuls(&body[cursor..cursor + TAG_SIZE]));
        // Zero padding after the last record reads as an empty tag.
        if tag == END_TAG || tag.is_empty() {
            break;
        }

        let code = read_u16(body, cursor + 4)?;
        let words = read_u16(body, cursor + 6)? as usize;
        let payload_start = cursor + RECORD_HEADER_SIZE;
        let payload_end = payload_start + words * 2;
        let Some(payload) = body.get(payload_start..payload_end) else {
            let reason = format!(
                "parameter {tag:?} payload of {} bytes overruns body of {} bytes",
                words * 2,
                body.len()
            );
            return Err(Error::body(block, reason));
        };

        let value = decode_value(code, payload)
            .map_err(|reason| Error::body(block, format!("parameter {tag:?}: {reason}")))?;
        trace!("{}: {} ({}) = {:?}", block, tag, value.kind(), value);

        entries.push(ParameterEntry { tag, value });
        cursor = payload_end;
    }

    Ok(entries)
}

/// Decode one payload according to its type code.
fn decode_value(code: u16, payload: &[u8]) -> core::result::Result<ParameterValue, String> {
    let Some(kind) = ParameterKind::from_code(code) else {
        return Err(format!("unknown type {code}"));
    };
    let value = match kind {
        ParameterKind::Int => read_i32(payload, 0).map(ParameterValue::Int),
        ParameterKind::Float => read_f64(payload, 0).map(ParameterValue::Float),
        ParameterKind::Str => {
            let text = payload.split(|&b| b == 0).next().unwrap_or_default();
            Ok(ParameterValue::Str(decode_string(text)))
        }
    };
    value.map_err(|e| e.to_string())
}

/// An ordered, tag-addressable parameter table.
///
/// When a tag repeats, the later value replaces the earlier one and keeps the
/// earlier position.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParameterTable {
    entries: IndexMap<String, ParameterValue>,
}

impl ParameterTable {
    /// Decode the parameter table described by `descriptor`.
    pub fn from_descriptor(data: &[u8], descriptor: &BlockDescriptor, block: &str) -> Result<Self> {
        let range = body_range(data.len(), descriptor.byte_offset, descriptor.chunk_count)?;
        Self::from_body(block, &data[range])
    }

    /// Decode an already sliced parameter body.
    pub fn from_body(block: &str, body: &[u8]) -> Result<Self> {
        Ok(decode_parameter_entries(block, body)?.into_iter().collect())
    }

    /// Look up a value by tag.
    pub fn get(&self, tag: &str) -> Option<&ParameterValue> {
        self.entries.get(tag)
    }

    pub fn get_int(&self, tag: &str) -> Option<i32> {
        self.get(tag).and_then(ParameterValue::as_int)
    }

    pub fn get_float(&self, tag: &str) -> Option<f64> {
        self.get(tag).and_then(ParameterValue::as_float)
    }

    pub fn get_str(&self, tag: &str) -> Option<&str> {
        self.get(tag).and_then(ParameterValue::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tags in table order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(tag, value)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries
            .iter()
            .map(|(tag, value)| (tag.as_str(), value))
    }
}

impl FromIterator<ParameterEntry> for ParameterTable {
    fn from_iter<I: IntoIterator<Item = ParameterEntry>>(iter: I) -> Self {
        let mut entries = IndexMap::new();
        for entry in iter {
            entries.insert(entry.tag, entry.value);
        }
        Self { entries }
    }
}

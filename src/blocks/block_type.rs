// block_type.rs
//! Block type resolution.
//!
//! Maps the `(data_kind, channel_kind, text_kind)` key of a directory entry to
//! the block's name and the decoder used for its body.
//!
//! Text blocks (`data_kind == 0`) fall back to a generic name for unknown
//! sub-kinds. The series and data-parameter kinds use strict channel tables:
//! an unknown channel there resolves to nothing, like an unknown data kind.

use super::directory::BlockDescriptor;
use crate::{Error, Result};

/// Which decoder handles a block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BodyKind {
    /// Free text, NUL padded.
    Text,
    /// Tagged, typed parameter records.
    ParameterTable,
    /// Contiguous little-endian float samples.
    NumericSeries,
}

/// A directory entry together with its resolved name and body decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedBlock {
    pub descriptor: BlockDescriptor,
    pub name: &'static str,
    pub body_kind: BodyKind,
}

impl ResolvedBlock {
    /// Resolve a descriptor, or fail with [`Error::UnresolvedBlockKind`].
    pub fn resolve(descriptor: BlockDescriptor) -> Result<Self> {
        let (name, body_kind) = resolve_kind(
            descriptor.data_kind,
            descriptor.channel_kind,
            descriptor.text_kind,
        )?;
        Ok(Self {
            descriptor,
            name,
            body_kind,
        })
    }
}

/// Resolve a composite block key to `(name, body kind)`.
pub fn resolve_kind(
    data_kind: u8,
    channel_kind: u8,
    text_kind: u8,
) -> Result<(&'static str, BodyKind)> {
    let unresolved = || Error::UnresolvedBlockKind {
        data_kind,
        channel_kind,
        text_kind,
    };

    match data_kind {
        0 => Ok(text_block(text_kind)),
        7 => sample_series(channel_kind)
            .map(|name| (name, BodyKind::NumericSeries))
            .ok_or_else(unresolved),
        11 => reference_series(channel_kind)
            .map(|name| (name, BodyKind::NumericSeries))
            .ok_or_else(unresolved),
        15 => Ok(("AB", BodyKind::NumericSeries)),
        23 => sample_data_parameter(channel_kind)
            .map(|name| (name, BodyKind::ParameterTable))
            .ok_or_else(unresolved),
        27 => reference_data_parameter(channel_kind)
            .map(|name| (name, BodyKind::ParameterTable))
            .ok_or_else(unresolved),
        31 => spectrum_data_parameter(channel_kind)
            .map(|name| (name, BodyKind::ParameterTable))
            .ok_or_else(unresolved),
        other => single_purpose(other)
            .map(|name| (name, BodyKind::ParameterTable))
            .ok_or_else(unresolved),
    }
}

// data_kind = 0, keyed on text_kind
fn text_block(text_kind: u8) -> (&'static str, BodyKind) {
    match text_kind {
        8 => ("Info Block", BodyKind::ParameterTable),
        104 => ("History", BodyKind::Text),
        152 => ("Curve Fit", BodyKind::Text),
        168 => ("Signature", BodyKind::Text),
        240 => ("Integration Method", BodyKind::Text),
        _ => ("Text Information", BodyKind::Text),
    }
}

// data_kind = 7
fn sample_series(channel_kind: u8) -> Option<&'static str> {
    match channel_kind {
        4 => Some("ScSm"),
        8 => Some("IgSm"),
        12 => Some("PhSm"),
        132 => Some("ScSm_(1)"),
        136 => Some("IgSm_(1)"),
        _ => None,
    }
}

// data_kind = 11
fn reference_series(channel_kind: u8) -> Option<&'static str> {
    match channel_kind {
        4 => Some("ScRf"),
        8 => Some("IgRf"),
        132 => Some("ScRf_(1)"),
        136 => Some("IgRf_(1)"),
        _ => None,
    }
}

// data_kind = 23
fn sample_data_parameter(channel_kind: u8) -> Option<&'static str> {
    match channel_kind {
        4 => Some("ScSm Data Parameter"),
        8 => Some("IgSm Data Parameter"),
        12 => Some("PhSm Data Parameter"),
        132 => Some("ScSm_(1) Data Parameter"),
        136 => Some("IgSm_(1) Data Parameter"),
        _ => None,
    }
}

// data_kind = 27
fn reference_data_parameter(channel_kind: u8) -> Option<&'static str> {
    match channel_kind {
        4 => Some("ScRf Data Parameter"),
        8 => Some("IgRf Data Parameter"),
        132 => Some("ScRf_(1) Data Parameter"),
        136 => Some("IgRf_(1) Data Parameter"),
        _ => None,
    }
}

// data_kind = 31
fn spectrum_data_parameter(channel_kind: u8) -> Option<&'static str> {
    match channel_kind {
        16 => Some("AB Data Parameter"),
        // Paired with the repeated AB spectrum (channel 144 of kind 15).
        144 => Some("AB_(1) Data Parameter"),
        _ => None,
    }
}

/// Data kinds that map to exactly one parameter block.
///
/// Kind 31 is listed for completeness but is always handled by the strict
/// channel table first.
fn single_purpose(data_kind: u8) -> Option<&'static str> {
    match data_kind {
        31 => Some("AB Data Parameter"),
        32 => Some("Instrument"),
        40 => Some("Instrument (Rf)"),
        48 => Some("Acquisition"),
        56 => Some("Acquisition (Rf)"),
        64 => Some("Fourier Transformation"),
        72 => Some("Fourier Transformation (Rf)"),
        96 => Some("Optik"),
        104 => Some("Optik (Rf)"),
        160 => Some("Sample"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_kinds_fall_back_to_text_information() -> Result<()> {
        assert_eq!(
            resolve_kind(0, 0, 8)?,
            ("Info Block", BodyKind::ParameterTable)
        );
        assert_eq!(resolve_kind(0, 0, 104)?, ("History", BodyKind::Text));
        assert_eq!(
            resolve_kind(0, 0, 240)?,
            ("Integration Method", BodyKind::Text)
        );
        for text_kind in [0u8, 1, 99, 255] {
            assert_eq!(
                resolve_kind(0, 77, text_kind)?,
                ("Text Information", BodyKind::Text)
            );
        }
        Ok(())
    }

    #[test]
    fn series_tables_are_strict() -> Result<()> {
        assert_eq!(resolve_kind(7, 4, 0)?, ("ScSm", BodyKind::NumericSeries));
        assert_eq!(
            resolve_kind(7, 136, 0)?,
            ("IgSm_(1)", BodyKind::NumericSeries)
        );
        assert_eq!(resolve_kind(11, 8, 0)?, ("IgRf", BodyKind::NumericSeries));
        assert_eq!(
            resolve_kind(7, 99, 3),
            Err(Error::UnresolvedBlockKind {
                data_kind: 7,
                channel_kind: 99,
                text_kind: 3
            })
        );
        // PhSm has no reference-channel counterpart.
        assert!(resolve_kind(11, 12, 0).is_err());
        Ok(())
    }

    #[test]
    fn absorbance_ignores_channel() -> Result<()> {
        assert_eq!(resolve_kind(15, 16, 0)?, ("AB", BodyKind::NumericSeries));
        assert_eq!(resolve_kind(15, 144, 0)?, ("AB", BodyKind::NumericSeries));
        Ok(())
    }

    #[test]
    fn data_parameter_tables() -> Result<()> {
        assert_eq!(
            resolve_kind(23, 12, 0)?,
            ("PhSm Data Parameter", BodyKind::ParameterTable)
        );
        assert_eq!(
            resolve_kind(27, 132, 0)?,
            ("ScRf_(1) Data Parameter", BodyKind::ParameterTable)
        );
        assert_eq!(
            resolve_kind(31, 144, 0)?,
            ("AB_(1) Data Parameter", BodyKind::ParameterTable)
        );
        // The flat table entry for 31 does not rescue an unknown channel.
        assert!(resolve_kind(31, 4, 0).is_err());
        assert!(resolve_kind(23, 0, 0).is_err());
        Ok(())
    }

    #[test]
    fn single_purpose_kinds() -> Result<()> {
        assert_eq!(
            resolve_kind(32, 0, 0)?,
            ("Instrument", BodyKind::ParameterTable)
        );
        assert_eq!(resolve_kind(96, 5, 7)?, ("Optik", BodyKind::ParameterTable));
        assert_eq!(
            resolve_kind(160, 0, 0)?,
            ("Sample", BodyKind::ParameterTable)
        );
        assert!(resolve_kind(1, 0, 0).is_err());
        assert!(resolve_kind(255, 0, 0).is_err());
        Ok(())
    }
}

//! Decoding (and re-encoding) of the two level wire formats.
//!
//! The binary layout is the canonical one: a row-count byte, a column-count
//! byte, then one packed slot code per cell in row-major order. The legacy
//! text layout carries the same data as lines of decimal counts followed by
//! binary-digit slot descriptors; old level files still decode through it.
//! The format is selected by the caller, never sniffed from the content.

use std::io;

use mitosis_core::{InvalidSlotCode, Slot};
use thiserror::Error;

use crate::Field;

/// Errors that fail a level load. No partially built field ever escapes.
#[derive(Debug, Error)]
pub enum LevelFormatError {
    /// The data ended before both dimension values were read.
    #[error("level data ends before both dimensions are described")]
    MissingDimensions,
    /// A dimension of zero describes an empty grid, which no level has.
    #[error("level describes a {rows}x{columns} field; both dimensions must be non-zero")]
    ZeroDimension {
        /// Row count carried by the level data.
        rows: u8,
        /// Column count carried by the level data.
        columns: u8,
    },
    /// The stream ended before every slot was described.
    #[error("level data truncated: expected {expected} slot descriptors, found {found}")]
    Truncated {
        /// Number of slots the dimensions promised.
        expected: usize,
        /// Number of slots actually present.
        found: usize,
    },
    /// The stream continued past the final slot descriptor.
    #[error("level data carries {extra} extra bytes or lines beyond the final slot")]
    TrailingData {
        /// How much data followed the last expected slot.
        extra: usize,
    },
    /// A slot byte did not fit the 6-bit packed encoding.
    #[error("slot {index}: {source}")]
    SlotCode {
        /// Row-major index of the offending slot.
        index: usize,
        /// The underlying code-range failure.
        source: InvalidSlotCode,
    },
    /// A legacy dimension line did not parse as a decimal count.
    #[error("line {line}: expected a decimal dimension, found {text:?}")]
    LegacyDimension {
        /// One-based line number within the level text.
        line: usize,
        /// The offending line content.
        text: String,
    },
    /// A legacy slot line was not a binary-digit slot descriptor.
    #[error("line {line}: {text:?} is not a binary slot descriptor")]
    LegacyDescriptor {
        /// One-based line number within the level text.
        line: usize,
        /// The offending line content.
        text: String,
    },
    /// The underlying byte stream failed while being read.
    #[error("failed to read level data")]
    Io(#[from] io::Error),
}

pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Field, LevelFormatError> {
    let [rows, columns, codes @ ..] = bytes else {
        return Err(LevelFormatError::MissingDimensions);
    };
    let (rows, columns) = (*rows, *columns);
    if rows == 0 || columns == 0 {
        return Err(LevelFormatError::ZeroDimension { rows, columns });
    }

    let expected = usize::from(rows) * usize::from(columns);
    if codes.len() < expected {
        return Err(LevelFormatError::Truncated {
            expected,
            found: codes.len(),
        });
    }
    if codes.len() > expected {
        return Err(LevelFormatError::TrailingData {
            extra: codes.len() - expected,
        });
    }

    let mut slots = Vec::with_capacity(expected);
    for (index, &code) in codes.iter().enumerate() {
        let slot = Slot::from_code(code)
            .map_err(|source| LevelFormatError::SlotCode { index, source })?;
        slots.push(slot);
    }
    Ok(Field::from_parts(u32::from(columns), u32::from(rows), slots))
}

pub(crate) fn from_legacy_text(text: &str) -> Result<Field, LevelFormatError> {
    let mut lines = text.lines().enumerate();
    let rows = parse_dimension(lines.next())?;
    let columns = parse_dimension(lines.next())?;
    if rows == 0 || columns == 0 {
        return Err(LevelFormatError::ZeroDimension { rows, columns });
    }

    let expected = usize::from(rows) * usize::from(columns);
    let mut slots = Vec::with_capacity(expected);
    for index in 0..expected {
        let Some((line_index, line)) = lines.next() else {
            return Err(LevelFormatError::Truncated {
                expected,
                found: index,
            });
        };
        let descriptor = line.trim();
        let code = u8::from_str_radix(descriptor, 2).map_err(|_| {
            LevelFormatError::LegacyDescriptor {
                line: line_index + 1,
                text: descriptor.to_owned(),
            }
        })?;
        let slot = Slot::from_code(code)
            .map_err(|source| LevelFormatError::SlotCode { index, source })?;
        slots.push(slot);
    }

    let extra = lines.filter(|(_, line)| !line.trim().is_empty()).count();
    if extra > 0 {
        return Err(LevelFormatError::TrailingData { extra });
    }
    Ok(Field::from_parts(u32::from(columns), u32::from(rows), slots))
}

pub(crate) fn to_bytes(field: &Field) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + field.slots().len());
    bytes.push(field.rows() as u8);
    bytes.push(field.columns() as u8);
    bytes.extend(field.slots().iter().map(Slot::code));
    bytes
}

fn parse_dimension(entry: Option<(usize, &str)>) -> Result<u8, LevelFormatError> {
    let Some((line_index, line)) = entry else {
        return Err(LevelFormatError::MissingDimensions);
    };
    line.trim()
        .parse::<u8>()
        .map_err(|_| LevelFormatError::LegacyDimension {
            line: line_index + 1,
            text: line.trim().to_owned(),
        })
}

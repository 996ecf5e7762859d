//! Purpose: Columnar codec contract shared by every concrete element type.
//! Exports: `Column`, `ColumnType`, numeric columns (`ColNum` and aliases), `ColStr`.
//! Role: Bulk encode/decode of one homogeneous column body; row counts come from the block header.
//! Invariants: `rows()` equals the number of stored values; `reset()` never changes `column_type()`.
//! Invariants: Column bodies carry no framing; values are packed back-to-back in row order.
//! Notes: After a failed `decode_column` the column is in an unspecified state and must be reset.
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::core::buffer::Buffer;
use crate::core::error::{Error, ErrorKind};
use crate::core::reader::Reader;

mod num;
mod string;

pub use num::{
    ColFloat32, ColFloat64, ColInt8, ColInt16, ColInt32, ColInt64, ColNum, ColUInt8, ColUInt16,
    ColUInt32, ColUInt64, FixedWidth,
};
pub use string::ColStr;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ColumnType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    String,
}

impl ColumnType {
    pub const ALL: &'static [ColumnType] = &[
        ColumnType::Int8,
        ColumnType::Int16,
        ColumnType::Int32,
        ColumnType::Int64,
        ColumnType::UInt8,
        ColumnType::UInt16,
        ColumnType::UInt32,
        ColumnType::UInt64,
        ColumnType::Float32,
        ColumnType::Float64,
        ColumnType::String,
    ];

    /// Type name as declared in a block header.
    pub fn name(self) -> &'static str {
        match self {
            ColumnType::Int8 => "Int8",
            ColumnType::Int16 => "Int16",
            ColumnType::Int32 => "Int32",
            ColumnType::Int64 => "Int64",
            ColumnType::UInt8 => "UInt8",
            ColumnType::UInt16 => "UInt16",
            ColumnType::UInt32 => "UInt32",
            ColumnType::UInt64 => "UInt64",
            ColumnType::Float32 => "Float32",
            ColumnType::Float64 => "Float64",
            ColumnType::String => "String",
        }
    }

    /// Width of one value, or `None` for variable-width types.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            ColumnType::Int8 | ColumnType::UInt8 => Some(1),
            ColumnType::Int16 | ColumnType::UInt16 => Some(2),
            ColumnType::Int32 | ColumnType::UInt32 | ColumnType::Float32 => Some(4),
            ColumnType::Int64 | ColumnType::UInt64 | ColumnType::Float64 => Some(8),
            ColumnType::String => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnType::ALL
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| {
                Error::new(ErrorKind::Malformed)
                    .with_message(format!("unsupported column type {s:?}"))
            })
    }
}

/// Bulk codec for one column body.
pub trait Column {
    fn column_type(&self) -> ColumnType;

    fn rows(&self) -> usize;

    /// Empties the column, keeping its allocation for the next block.
    fn reset(&mut self);

    /// Appends every row to `b` with no length prefix.
    fn encode_column(&self, b: &mut Buffer);

    /// Replaces the contents with exactly `rows` values read from `r`.
    fn decode_column<R: Read>(&mut self, r: &mut Reader<R>, rows: usize) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::ColumnType;
    use crate::core::error::ErrorKind;

    #[test]
    fn type_names_parse_back() {
        for t in ColumnType::ALL {
            assert_eq!(t.name().parse::<ColumnType>().expect("parse"), *t);
        }
    }

    #[test]
    fn unknown_type_name_is_rejected() {
        let err = "Nullable(Int64)".parse::<ColumnType>().expect_err("unknown");
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn widths_match_wire_sizes() {
        assert_eq!(ColumnType::UInt8.fixed_width(), Some(1));
        assert_eq!(ColumnType::Float32.fixed_width(), Some(4));
        assert_eq!(ColumnType::Int64.fixed_width(), Some(8));
        assert_eq!(ColumnType::String.fixed_width(), None);
    }
}

//! This module defines the canonical, type-safe data representations used
//! throughout the fixrec codec.
//!
//! It includes the `Utype` enum, which replaces the fragile string-based
//! field-type identifiers of caller configuration with a safe, serializable,
//! and Arrow-compatible enum, and the `FieldValue` cell type exchanged with
//! the generator.

use arrow::datatypes::DataType as ArrowDataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical representation of a field's declared type.
///
/// The serde identifiers (`"int"`, `"uint"`, `"str"`) are the values accepted
/// in caller-supplied layout configuration and are part of the public contract.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Utype {
    /// Signed base-10 integer, decoded to `i64`.
    Int,
    /// Unsigned base-10 integer, decoded to `u64`.
    Uint,
    /// Text, decoded through the field's codepage.
    Str,
}

impl Utype {
    /// Converts a `Utype` into the Arrow `DataType` of its output column.
    pub fn to_arrow_type(&self) -> ArrowDataType {
        match self {
            Self::Int => ArrowDataType::Int64,
            Self::Uint => ArrowDataType::UInt64,
            Self::Str => ArrowDataType::Utf8,
        }
    }

    /// Returns `true` if the type is a signed or unsigned integer.
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    /// Returns `true` if the type is a signed integer.
    pub fn is_signed_int(&self) -> bool {
        matches!(self, Self::Int)
    }
}

/// Provides the canonical string representation for a `Utype`.
impl fmt::Display for Utype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // These string representations match the serde identifiers used in
        // caller configuration.
        match self {
            Self::Int => write!(f, "int"),
            Self::Uint => write!(f, "uint"),
            Self::Str => write!(f, "str"),
        }
    }
}

/// One decoded or to-be-encoded cell value.
///
/// The generator samples `FieldValue`s and serializes them into raw blocks;
/// round-trip tests compare decoded columns against them cell by cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Uint(u64),
    Str(String),
}

impl FieldValue {
    /// The `Utype` this value belongs to.
    pub fn utype(&self) -> Utype {
        match self {
            Self::Int(_) => Utype::Int,
            Self::Uint(_) => Utype::Uint,
            Self::Str(_) => Utype::Str,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Uint(v) => write!(f, "{}", v),
            Self::Str(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utype_serde_identifiers() {
        assert_eq!(serde_json::to_string(&Utype::Int).unwrap(), "\"int\"");
        assert_eq!(serde_json::to_string(&Utype::Uint).unwrap(), "\"uint\"");
        assert_eq!(serde_json::to_string(&Utype::Str).unwrap(), "\"str\"");
        let parsed: Utype = serde_json::from_str("\"uint\"").unwrap();
        assert_eq!(parsed, Utype::Uint);
    }

    #[test]
    fn test_utype_arrow_mapping() {
        assert_eq!(Utype::Int.to_arrow_type(), ArrowDataType::Int64);
        assert_eq!(Utype::Uint.to_arrow_type(), ArrowDataType::UInt64);
        assert_eq!(Utype::Str.to_arrow_type(), ArrowDataType::Utf8);
    }
}

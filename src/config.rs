// In: src/config.rs

//! The single source of truth for all fixrec engine configuration.
//!
//! This module defines one explicit, statically-typed options struct per
//! engine component (`DecoderOptions`, `GeneratorOptions`), designed to be
//! created once at the application boundary (e.g., from the host framework's
//! option dictionary via the `tool` module) and bound to an engine instance
//! for its lifetime.
//!
//! Precedence is always explicit override > declared default; there is no
//! dynamic attribute discovery anywhere in the crate.

use serde::{Deserialize, Serialize};

use crate::encoding::TextEncoding;

//==================================================================================
// I. Core Configuration Enums
//==================================================================================

/// How the generator serializes the sign of a signed-integer field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SignStyle {
    /// **Default:** negatives carry a leading `-`, positives are plain
    /// zero-padded digits. Unambiguous for fields of any length.
    #[default]
    Leading,

    /// Mainframe zoned style: the last byte of the field is a zone-sign
    /// character (`A`/`J` by convention here) and the digits occupy the
    /// preceding bytes. Matches legacy feeds byte-for-byte.
    TrailingZone,
}

//==================================================================================
// II. Per-Component Options
//==================================================================================

/// Options bound to a `Decoder` for its lifetime.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct DecoderOptions {
    /// Default codepage for fields that do not declare their own.
    #[serde(default)]
    pub encoding: TextEncoding,

    /// If true (the default), a value outside a field's declared bounds
    /// aborts the whole decode. If false, violations are collected as
    /// diagnostics on the returned batch and decoding continues.
    #[serde(default = "default_true")]
    pub strict_bounds: bool,

    /// If true, leading/trailing blanks in numeric fields are ignored and an
    /// all-blank span decodes to 0. The default treats any blank in a numeric
    /// field as a decode error.
    #[serde(default)]
    pub blanks_as_zero: bool,

    /// If true, trailing spaces are stripped from string fields. The default
    /// preserves padding verbatim.
    #[serde(default)]
    pub trim_padding: bool,

    /// Target rows per internal conversion chunk. A block whose row count
    /// exceeds this would convert into multiple batches, which violates the
    /// one-block-one-batch contract and fails with `MultiBatch`. `None`
    /// (the default) never chunks.
    #[serde(default)]
    pub chunk_size_rows: Option<usize>,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            strict_bounds: true,
            blanks_as_zero: false,
            trim_padding: false,
            chunk_size_rows: None,
        }
    }
}

/// Options bound to a `Generator` for its lifetime.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorOptions {
    /// Default codepage for fields that do not declare their own. Must match
    /// the decoder's for round-trip use.
    #[serde(default)]
    pub encoding: TextEncoding,

    /// Serialization convention for signed-integer fields.
    #[serde(default)]
    pub sign_style: SignStyle,
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

//! The typed rendition of the host framework's option dictionary.
//!
//! Every recognized option is a named field with a declared default; unknown
//! options are captured verbatim in `extra` and passed through for the host
//! framework to interpret. Precedence is explicit override > declared
//! default. There is no reflective option discovery: what this struct names
//! is exactly what the engines consume.

use serde::{Deserialize, Serialize};

use crate::config::{DecoderOptions, GeneratorOptions, SignStyle};
use crate::encoding::TextEncoding;
use crate::error::FixrecError;
use crate::schema::{FieldSpec, Schema};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ToolOptions {
    /// The record layout, in physical field order.
    #[serde(default)]
    pub ds_schema: Vec<FieldSpec>,

    /// Engine-level default codepage for fields without their own.
    #[serde(default)]
    pub encoding: Option<TextEncoding>,

    /// Abort on bounds violations (default) vs. collect them as diagnostics.
    #[serde(default)]
    pub strict_bounds: Option<bool>,

    /// Treat blanks in numeric fields as padding, all-blank as zero.
    #[serde(default)]
    pub blanks_as_zero: Option<bool>,

    /// Strip trailing spaces from string fields.
    #[serde(default)]
    pub trim_padding: Option<bool>,

    /// Internal conversion chunk size; see `DecoderOptions::chunk_size_rows`.
    #[serde(default)]
    pub chunk_size_rows: Option<usize>,

    /// Sign convention for generated signed fields.
    #[serde(default)]
    pub sign_style: Option<SignStyle>,

    /// Rows per generated chunk (generator tools only).
    #[serde(default)]
    pub num_rows: Option<usize>,

    /// Seed for deterministic generation (generator tools only).
    #[serde(default)]
    pub seed: Option<u64>,

    /// Options this engine does not recognize, passed through unchanged for
    /// the host framework.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ToolOptions {
    /// Deserializes the host framework's option dictionary.
    pub fn from_json(value: serde_json::Value) -> Result<Self, FixrecError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Builds the validated record layout from `ds_schema`.
    pub fn build_schema(&self) -> Result<Schema, FixrecError> {
        Schema::build(self.ds_schema.clone())
    }

    /// Resolves decoder options: explicit overrides over declared defaults.
    pub fn decoder_options(&self) -> DecoderOptions {
        let defaults = DecoderOptions::default();
        DecoderOptions {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            strict_bounds: self.strict_bounds.unwrap_or(defaults.strict_bounds),
            blanks_as_zero: self.blanks_as_zero.unwrap_or(defaults.blanks_as_zero),
            trim_padding: self.trim_padding.unwrap_or(defaults.trim_padding),
            chunk_size_rows: self.chunk_size_rows.or(defaults.chunk_size_rows),
        }
    }

    /// Resolves generator options: explicit overrides over declared defaults.
    pub fn generator_options(&self) -> GeneratorOptions {
        let defaults = GeneratorOptions::default();
        GeneratorOptions {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            sign_style: self.sign_style.unwrap_or(defaults.sign_style),
        }
    }

    /// Convenience constructor for callers assembling options in code.
    pub fn with_schema(fields: Vec<FieldSpec>) -> Self {
        Self {
            ds_schema: fields,
            ..Self::default()
        }
    }
}

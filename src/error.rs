// In: src/error.rs

//! This module defines the single, unified error type for the entire fixrec library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixrecError {
    // =========================================================================
    // === Configuration-Time Errors
    // =========================================================================
    /// A malformed `FieldSpec` or `Schema` detected when the layout is built.
    /// Fatal and never retried; `field` is the zero-based index in the layout.
    #[error("Invalid schema at field {field}: {reason}")]
    Schema { field: usize, reason: String },

    // =========================================================================
    // === Decode-Time Errors
    // =========================================================================
    /// The block length does not decompose into whole records.
    #[error("Malformed block: {len} bytes is not a multiple of the record width {record_width}")]
    MalformedBlock { len: usize, record_width: usize },

    /// A field's bytes do not parse as the declared type. Fatal for the call;
    /// decoding is all-or-nothing per block.
    #[error("Field decode failed at row {row}, field {field} ({name}): {reason}")]
    FieldDecode {
        row: usize,
        field: usize,
        name: String,
        reason: String,
    },

    /// A decoded value fell outside the declared `[min_val, max_val]` range.
    /// Fatal only under strict bounds; otherwise collected as a diagnostic.
    #[error(
        "Bounds violation at row {row}, field {field} ({name}): value {value} outside [{min_val}, {max_val}]"
    )]
    BoundsViolation {
        row: usize,
        field: usize,
        name: String,
        value: i128,
        min_val: i64,
        max_val: i64,
    },

    /// The chunked conversion produced more than one batch for a single block.
    /// Always fatal: one block must yield exactly one batch.
    #[error("Conversion produced {0} batches for one block; expected exactly 1")]
    MultiBatch(usize),

    // =========================================================================
    // === Generate-Time Errors
    // =========================================================================
    /// A caller-supplied value cannot be serialized into its declared field.
    #[error("Field encode failed at row {row}, field {field} ({name}): {reason}")]
    FieldEncode {
        row: usize,
        field: usize,
        name: String,
        reason: String,
    },

    // =========================================================================
    // === Codepage Errors
    // =========================================================================
    /// A byte sequence is not representable in the declared codepage, or a
    /// character cannot be encoded back into it. The engines wrap this with
    /// row/field context before it reaches the caller.
    #[error("Codepage {codepage}: {reason}")]
    Encoding { codepage: String, reason: String },

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error from the Serde JSON library, typically during option parsing.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An internal invariant breach. Seeing this is a bug in fixrec itself.
    #[error("Internal logic error (this is a bug): {0}")]
    Internal(String),
}

//! The columnar result container produced by one decode call.
//!
//! A `DecodedBatch` wraps an Arrow `RecordBatch` (one contiguous typed array
//! per schema field) together with the bounds diagnostics collected under
//! lenient strictness. It is immutable once produced; the decoder keeps no
//! reference to it between calls.

use std::fmt;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

/// One out-of-bounds value observed while decoding with
/// `strict_bounds = false`. Carries everything needed to diagnose the row
/// without re-running the decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsDiagnostic {
    pub row: usize,
    pub field: usize,
    pub name: String,
    pub value: i128,
    pub min_val: i64,
    pub max_val: i64,
}

impl fmt::Display for BoundsDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, field {} ({}): value {} outside [{}, {}]",
            self.row, self.field, self.name, self.value, self.min_val, self.max_val
        )
    }
}

/// An immutable columnar snapshot of the decoded rows of one block.
#[derive(Debug, Clone)]
pub struct DecodedBatch {
    batch: RecordBatch,
    diagnostics: Vec<BoundsDiagnostic>,
}

impl DecodedBatch {
    pub(crate) fn new(batch: RecordBatch, diagnostics: Vec<BoundsDiagnostic>) -> Self {
        Self { batch, diagnostics }
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    /// The column at `index`, in schema field order.
    pub fn column(&self, index: usize) -> &ArrayRef {
        self.batch.column(index)
    }

    /// The column with the given resolved field name, if any.
    pub fn column_by_name(&self, name: &str) -> Option<&ArrayRef> {
        self.batch.column_by_name(name)
    }

    /// The Arrow schema of the result: one non-nullable column per field.
    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// The underlying Arrow record batch.
    pub fn record_batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Bounds violations collected under `strict_bounds = false`. Empty when
    /// decoding strictly (violations abort the call instead).
    pub fn diagnostics(&self) -> &[BoundsDiagnostic] {
        &self.diagnostics
    }

    /// Consumes the wrapper, yielding the Arrow record batch.
    pub fn into_record_batch(self) -> RecordBatch {
        self.batch
    }
}

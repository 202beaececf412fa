// In: src/decoder/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Decode Engine
// ====================================================================================
//
// The `Decoder` turns one raw block of concatenated fixed-width records into
// exactly one columnar batch.
//
// Data Flow:
//
//   1. [Structural Validation]  -> block length must be a whole number of records
//         |
//   2. [Row Slicing]            -> `num_rows` contiguous `record_width`-byte slices
//         |
//   3. [Field Slicing]          -> per-field spans at the schema's precomputed offsets
//         |
//   4. [Field Decode]           -> codepage -> text -> typed parse -> bounds check
//         |
//   5. [Column Assembly]        -> contiguous typed Arrow builders, one per field
//         |
//   6. [Batch Invariant]        -> exactly one RecordBatch per call, or `MultiBatch`
//
// The decoder is stateless with respect to data: it holds only the bound
// `Arc<Schema>` and its options, so a single instance may be shared read-only
// across concurrent callers.
// ====================================================================================

mod columns;

use std::sync::Arc;

use arrow::record_batch::RecordBatch;

use crate::batch::{BoundsDiagnostic, DecodedBatch};
use crate::config::DecoderOptions;
use crate::error::FixrecError;
use crate::kernels::numeral;
use crate::schema::{FieldSpec, Schema};
use crate::types::{FieldValue, Utype};

use columns::ColumnSink;

/// The decode engine, bound to an immutable schema and options for its
/// lifetime.
#[derive(Debug, Clone)]
pub struct Decoder {
    schema: Arc<Schema>,
    options: DecoderOptions,
}

impl Decoder {
    pub fn new(schema: Arc<Schema>, options: DecoderOptions) -> Self {
        Self { schema, options }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Decodes one raw block into one columnar batch.
    ///
    /// An empty block yields a zero-row batch with correctly typed empty
    /// columns; a non-empty block that does not decompose into whole records
    /// is a `MalformedBlock` error.
    pub fn decode(&self, block: &[u8]) -> Result<DecodedBatch, FixrecError> {
        let record_width = self.schema.record_width();
        if record_width == 0 || block.len() % record_width != 0 {
            return Err(FixrecError::MalformedBlock {
                len: block.len(),
                record_width,
            });
        }

        let num_rows = block.len() / record_width;
        log_event!(
            "event" = "decode",
            "rows" = &num_rows,
            "record_width" = &record_width,
        );

        // Empty block: one correctly shaped empty batch, not an error.
        if num_rows == 0 {
            let empty = RecordBatch::new_empty(self.schema.arrow_schema());
            return Ok(DecodedBatch::new(empty, Vec::new()));
        }

        // Partition rows per the internal chunking knob, then enforce the
        // one-block-one-batch contract over whatever that produced.
        let chunk_rows = match self.options.chunk_size_rows {
            Some(0) => {
                return Err(FixrecError::Internal(
                    "chunk_size_rows must be positive".to_string(),
                ))
            }
            Some(n) => n,
            None => num_rows,
        };

        let mut diagnostics = Vec::new();
        let mut batches = Vec::new();
        let mut first_row = 0;
        while first_row < num_rows {
            let rows = chunk_rows.min(num_rows - first_row);
            let chunk = &block[first_row * record_width..(first_row + rows) * record_width];
            batches.push(self.decode_rows(chunk, first_row, rows, &mut diagnostics)?);
            first_row += rows;
        }

        if batches.len() != 1 {
            log_event!("event" = "decode_multi_batch", "batches" = &batches.len());
            return Err(FixrecError::MultiBatch(batches.len()));
        }
        let batch = batches.pop().ok_or_else(|| {
            FixrecError::Internal("chunk partitioning produced no batches".to_string())
        })?;
        Ok(DecodedBatch::new(batch, diagnostics))
    }

    /// Decodes `rows` whole records starting at global row `row_offset` into
    /// one record batch, appending lenient-mode diagnostics.
    fn decode_rows(
        &self,
        chunk: &[u8],
        row_offset: usize,
        rows: usize,
        diagnostics: &mut Vec<BoundsDiagnostic>,
    ) -> Result<RecordBatch, FixrecError> {
        let record_width = self.schema.record_width();
        let mut sinks: Vec<ColumnSink> = self
            .schema
            .fields()
            .iter()
            .map(|f| ColumnSink::with_capacity(f.utype, rows, f.length))
            .collect();

        for r in 0..rows {
            let row = row_offset + r;
            let record = &chunk[r * record_width..(r + 1) * record_width];
            for (i, field) in self.schema.fields().iter().enumerate() {
                let span = &record[self.schema.span(i)];
                let value = self.decode_field(span, field, i, row, diagnostics)?;
                sinks[i].push(value)?;
            }
        }

        let arrays = sinks.iter_mut().map(|s| s.finish()).collect();
        Ok(RecordBatch::try_new(self.schema.arrow_schema(), arrays)?)
    }

    /// Decodes a single field span: codepage to text, typed parse, bounds
    /// check.
    fn decode_field(
        &self,
        span: &[u8],
        field: &FieldSpec,
        index: usize,
        row: usize,
        diagnostics: &mut Vec<BoundsDiagnostic>,
    ) -> Result<FieldValue, FixrecError> {
        let field_error = |reason: String| FixrecError::FieldDecode {
            row,
            field: index,
            name: self.schema.field_name(index).to_string(),
            reason,
        };

        let encoding = self.schema.resolved_encoding(index, self.options.encoding);
        let text = encoding
            .decode(span)
            .map_err(|e| field_error(e.to_string()))?;

        match field.utype {
            Utype::Str => {
                let value = if self.options.trim_padding {
                    text.trim_end_matches(' ').to_string()
                } else {
                    text
                };
                Ok(FieldValue::Str(value))
            }
            Utype::Uint => {
                let value = numeral::parse_unsigned(&text, self.options.blanks_as_zero)
                    .map_err(field_error)?;
                self.check_bounds(field, index, row, value as i128, diagnostics)?;
                Ok(FieldValue::Uint(value))
            }
            Utype::Int => {
                let value = numeral::parse_signed(&text, self.options.blanks_as_zero)
                    .map_err(field_error)?;
                self.check_bounds(field, index, row, value as i128, diagnostics)?;
                Ok(FieldValue::Int(value))
            }
        }
    }

    /// Applies the field's declared bounds to a decoded value. Strict mode
    /// aborts the call; lenient mode records a diagnostic and keeps going.
    fn check_bounds(
        &self,
        field: &FieldSpec,
        index: usize,
        row: usize,
        value: i128,
        diagnostics: &mut Vec<BoundsDiagnostic>,
    ) -> Result<(), FixrecError> {
        let (min_val, max_val) = match (field.min_val, field.max_val) {
            (None, None) => return Ok(()),
            bounds => bounds,
        };
        let below = matches!(min_val, Some(min) if value < min as i128);
        let above = matches!(max_val, Some(max) if value > max as i128);
        if !below && !above {
            return Ok(());
        }

        let name = self.schema.field_name(index).to_string();
        let min_val = min_val.unwrap_or(i64::MIN);
        let max_val = max_val.unwrap_or(i64::MAX);
        if self.options.strict_bounds {
            return Err(FixrecError::BoundsViolation {
                row,
                field: index,
                name,
                value,
                min_val,
                max_val,
            });
        }
        diagnostics.push(BoundsDiagnostic {
            row,
            field: index,
            name,
            value,
            min_val,
            max_val,
        });
        Ok(())
    }
}

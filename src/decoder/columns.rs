//! Contiguous typed column accumulation for the decoder.
//!
//! One `ColumnSink` per schema field wraps the matching Arrow builder, so
//! decoded values land directly in contiguous typed storage and `finish`
//! hands the backing array to the record batch without copying.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Builder, StringBuilder, UInt64Builder};

use crate::error::FixrecError;
use crate::types::{FieldValue, Utype};

pub(crate) enum ColumnSink {
    Int(Int64Builder),
    Uint(UInt64Builder),
    Str(StringBuilder),
}

impl ColumnSink {
    pub(crate) fn with_capacity(utype: Utype, rows: usize, byte_width: usize) -> Self {
        match utype {
            Utype::Int => Self::Int(Int64Builder::with_capacity(rows)),
            Utype::Uint => Self::Uint(UInt64Builder::with_capacity(rows)),
            Utype::Str => Self::Str(StringBuilder::with_capacity(rows, rows * byte_width)),
        }
    }

    /// Appends one decoded cell. The decoder always routes a value to the
    /// sink built for its field, so a type mismatch here is a crate bug.
    pub(crate) fn push(&mut self, value: FieldValue) -> Result<(), FixrecError> {
        match (self, &value) {
            (Self::Int(builder), FieldValue::Int(v)) => builder.append_value(*v),
            (Self::Uint(builder), FieldValue::Uint(v)) => builder.append_value(*v),
            (Self::Str(builder), FieldValue::Str(v)) => builder.append_value(v),
            (_, value) => {
                return Err(FixrecError::Internal(format!(
                    "column sink received mismatched {} value",
                    value.utype()
                )))
            }
        }
        Ok(())
    }

    pub(crate) fn finish(&mut self) -> ArrayRef {
        match self {
            Self::Int(builder) => Arc::new(builder.finish()),
            Self::Uint(builder) => Arc::new(builder.finish()),
            Self::Str(builder) => Arc::new(builder.finish()),
        }
    }
}

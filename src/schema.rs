//! Record layout declaration and validation.
//!
//! A `Schema` is an ordered sequence of `FieldSpec`s. Order defines both the
//! physical byte layout of a record and the column order of decoded batches.
//! Once built, a schema is immutable; decoders and generators bind to it via
//! `Arc<Schema>` and share it freely across threads.

use std::ops::Range;
use std::sync::Arc;

use arrow::datatypes::{Field, Schema as ArrowSchema, SchemaRef};
use serde::{Deserialize, Serialize};

use crate::encoding::TextEncoding;
use crate::error::FixrecError;
use crate::kernels::numeral::max_for_digits;
use crate::types::Utype;

/// Declarative description of one fixed-width field: its type, the byte span
/// it occupies in the record, optional inclusive value bounds (integer types
/// only), and an optional per-field codepage overriding the engine default.
///
/// The serde shape matches the layout dictionaries accepted at the tool
/// boundary, e.g. `{"utype": "uint", "length": 6, "min_val": 0, "max_val": 10}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Column name. Anonymous fields are named `f{index}` at schema build.
    #[serde(default)]
    pub name: Option<String>,
    pub utype: Utype,
    /// Bytes occupied in the record. Must be at least 1.
    pub length: usize,
    #[serde(default)]
    pub min_val: Option<i64>,
    #[serde(default)]
    pub max_val: Option<i64>,
    /// Per-field codepage. `None` falls back to the engine-level default.
    #[serde(default)]
    pub encoding: Option<TextEncoding>,
}

impl FieldSpec {
    pub fn new(utype: Utype, length: usize) -> Self {
        Self {
            name: None,
            utype,
            length,
            min_val: None,
            max_val: None,
            encoding: None,
        }
    }

    /// A signed-integer field of `length` bytes.
    pub fn integer(length: usize) -> Self {
        Self::new(Utype::Int, length)
    }

    /// An unsigned-integer field of `length` bytes.
    pub fn unsigned(length: usize) -> Self {
        Self::new(Utype::Uint, length)
    }

    /// A string field of `length` bytes.
    pub fn string(length: usize) -> Self {
        Self::new(Utype::Str, length)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_bounds(mut self, min_val: i64, max_val: i64) -> Self {
        self.min_val = Some(min_val);
        self.max_val = Some(max_val);
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// The number of digit positions available once serialized: the whole
    /// field for unsigned values, one byte less for signed values because the
    /// sign position is reserved.
    fn digit_capacity(&self) -> usize {
        match self.utype {
            Utype::Int => self.length.saturating_sub(1),
            _ => self.length,
        }
    }

    fn validate(&self, index: usize) -> Result<(), FixrecError> {
        let fail = |reason: String| FixrecError::Schema {
            field: index,
            reason,
        };

        if self.length < 1 {
            return Err(fail("length must be at least 1".to_string()));
        }
        if let (Some(min), Some(max)) = (self.min_val, self.max_val) {
            if min > max {
                return Err(fail(format!("min_val {} exceeds max_val {}", min, max)));
            }
        }
        match self.utype {
            Utype::Str => {
                if self.min_val.is_some() || self.max_val.is_some() {
                    return Err(fail("bounds are not applicable to str fields".to_string()));
                }
            }
            Utype::Uint => {
                for bound in [self.min_val, self.max_val].into_iter().flatten() {
                    if bound < 0 {
                        return Err(fail("bounds must be non-negative for uint fields".to_string()));
                    }
                }
                let cap = max_for_digits::<u64>(self.digit_capacity());
                if let Some(max) = self.max_val {
                    if max as u64 > cap {
                        return Err(fail(format!(
                            "max_val {} does not fit in {} digit(s)",
                            max,
                            self.digit_capacity()
                        )));
                    }
                }
            }
            Utype::Int => {
                let cap = max_for_digits::<u64>(self.digit_capacity());
                for bound in [self.min_val, self.max_val].into_iter().flatten() {
                    if bound.unsigned_abs() > cap {
                        return Err(fail(format!(
                            "bound {} does not fit in {} digit(s) plus sign",
                            bound,
                            self.digit_capacity()
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// A validated, immutable record layout with precomputed field offsets and
/// the Arrow schema of decoded batches.
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
    offsets: Vec<usize>,
    record_width: usize,
    arrow: SchemaRef,
}

impl Schema {
    /// Validates every field, resolves anonymous field names, precomputes
    /// byte offsets, and materializes the Arrow schema. Pure, no side effects.
    pub fn build(fields: Vec<FieldSpec>) -> Result<Self, FixrecError> {
        let mut resolved = fields;
        let mut offsets = Vec::with_capacity(resolved.len());
        let mut width = 0usize;

        for (i, field) in resolved.iter_mut().enumerate() {
            field.validate(i)?;
            if field.name.is_none() {
                field.name = Some(format!("f{}", i));
            }
            offsets.push(width);
            width += field.length;
        }

        let arrow_fields: Vec<Field> = resolved
            .iter()
            .map(|f| {
                Field::new(
                    f.name.as_deref().unwrap_or_default(),
                    f.utype.to_arrow_type(),
                    false,
                )
            })
            .collect();

        Ok(Self {
            fields: resolved,
            offsets,
            record_width: width,
            arrow: Arc::new(ArrowSchema::new(arrow_fields)),
        })
    }

    /// Total bytes occupied by one record: the sum of all field lengths.
    pub fn record_width(&self) -> usize {
        self.record_width
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> &FieldSpec {
        &self.fields[index]
    }

    /// Resolved column name of the field at `index`.
    pub fn field_name(&self, index: usize) -> &str {
        self.fields[index].name.as_deref().unwrap_or_default()
    }

    /// Byte span of the field at `index` within a record slice.
    pub fn span(&self, index: usize) -> Range<usize> {
        let start = self.offsets[index];
        start..start + self.fields[index].length
    }

    /// Codepage of the field at `index`, falling back to `default`.
    pub fn resolved_encoding(&self, index: usize, default: TextEncoding) -> TextEncoding {
        self.fields[index].encoding.unwrap_or(default)
    }

    /// The Arrow schema decoded batches carry: one non-nullable column per
    /// field, in layout order.
    pub fn arrow_schema(&self) -> SchemaRef {
        self.arrow.clone()
    }
}

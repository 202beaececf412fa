// In: src/generator/mod.rs

//! The synthetic-data engine: produces raw blocks conforming to a schema,
//! for round-trip testing and load generation.
//!
//! Generation is the exact mirror of decoding. Values are sampled inside the
//! schema's declared constraints, serialized through the same numeral kernels
//! and codepages the decoder reads with, and concatenated with no separators,
//! so `decode(generate(n, seed))` always reproduces the sampled values.

#[cfg(test)]
mod tests;

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GeneratorOptions, SignStyle};
use crate::error::FixrecError;
use crate::kernels::numeral::{self, max_for_digits};
use crate::schema::{FieldSpec, Schema};
use crate::types::{FieldValue, Utype};

/// Characters drawn for synthetic string fields. One byte per character in
/// every supported codepage.
const STRING_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The generation engine, bound to an immutable schema and options for its
/// lifetime.
#[derive(Debug, Clone)]
pub struct Generator {
    schema: Arc<Schema>,
    options: GeneratorOptions,
}

impl Generator {
    /// Binds a generator to a schema. Fails if the configured sign style
    /// cannot represent some field (a trailing zone sign needs at least one
    /// digit byte before it).
    pub fn new(schema: Arc<Schema>, options: GeneratorOptions) -> Result<Self, FixrecError> {
        if options.sign_style == SignStyle::TrailingZone {
            for (i, field) in schema.fields().iter().enumerate() {
                if field.utype == Utype::Int && field.length < 2 {
                    return Err(FixrecError::Schema {
                        field: i,
                        reason: "trailing zone sign needs a field length of at least 2".to_string(),
                    });
                }
            }
        }
        Ok(Self { schema, options })
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Produces one raw block of `num_rows` synthetic records.
    ///
    /// The same `seed` yields byte-identical output on every call; `None`
    /// draws from OS entropy.
    pub fn generate(&self, num_rows: usize, seed: Option<u64>) -> Result<Vec<u8>, FixrecError> {
        let rows = self.sample_rows(num_rows, seed);
        log_event!(
            "event" = "generate",
            "rows" = &num_rows,
            "record_width" = &self.schema.record_width(),
        );
        // Sampled values always fit their fields; a failure here is a bug.
        self.encode_rows(&rows)
            .map_err(|e| FixrecError::Internal(format!("sampled value failed to serialize: {}", e)))
    }

    /// Samples `num_rows` rows of values satisfying every field's declared
    /// constraints, without serializing them.
    pub fn sample_rows(&self, num_rows: usize, seed: Option<u64>) -> Vec<Vec<FieldValue>> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        (0..num_rows)
            .map(|_| {
                self.schema
                    .fields()
                    .iter()
                    .map(|field| self.sample_field(field, &mut rng))
                    .collect()
            })
            .collect()
    }

    /// Serializes caller-supplied rows into a raw block: integers zero-padded
    /// to width under the configured sign style, strings padded with encoded
    /// spaces, every field re-encoded through its resolved codepage.
    ///
    /// Declared bounds are NOT enforced here, so fixtures exercising
    /// bounds-violation handling can be produced deliberately.
    pub fn encode_rows(&self, rows: &[Vec<FieldValue>]) -> Result<Vec<u8>, FixrecError> {
        let mut block = Vec::with_capacity(rows.len() * self.schema.record_width());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != self.schema.field_count() {
                return Err(FixrecError::Internal(format!(
                    "row {} has {} values for {} fields",
                    row,
                    values.len(),
                    self.schema.field_count()
                )));
            }
            for (i, value) in values.iter().enumerate() {
                self.encode_field(value, i, row, &mut block)?;
            }
        }
        Ok(block)
    }

    fn sample_field(&self, field: &FieldSpec, rng: &mut StdRng) -> FieldValue {
        match field.utype {
            Utype::Uint => {
                let cap = max_for_digits::<u64>(field.length);
                let min = field.min_val.unwrap_or(0).max(0) as u64;
                let max = field.max_val.map(|m| m as u64).unwrap_or(cap);
                FieldValue::Uint(rng.random_range(min..=max))
            }
            Utype::Int => {
                let cap = max_for_digits::<u64>(field.length.saturating_sub(1));
                let cap = cap.min(i64::MAX as u64) as i64;
                let min = field.min_val.unwrap_or(-cap);
                let max = field.max_val.unwrap_or(cap);
                FieldValue::Int(rng.random_range(min..=max))
            }
            Utype::Str => {
                let text: String = (0..field.length)
                    .map(|_| STRING_CHARSET[rng.random_range(0..STRING_CHARSET.len())] as char)
                    .collect();
                FieldValue::Str(text)
            }
        }
    }

    /// Serializes one cell to exactly `field.length` bytes and appends it.
    fn encode_field(
        &self,
        value: &FieldValue,
        index: usize,
        row: usize,
        block: &mut Vec<u8>,
    ) -> Result<(), FixrecError> {
        let field = self.schema.field(index);
        let field_error = |reason: String| FixrecError::FieldEncode {
            row,
            field: index,
            name: self.schema.field_name(index).to_string(),
            reason,
        };

        let encoding = self.schema.resolved_encoding(index, self.options.encoding);
        let text = match (field.utype, value) {
            (Utype::Uint, FieldValue::Uint(v)) => {
                numeral::format_unsigned(*v, field.length).map_err(&field_error)?
            }
            (Utype::Int, FieldValue::Int(v)) => {
                numeral::format_signed(*v, field.length, self.options.sign_style)
                    .map_err(&field_error)?
            }
            (Utype::Str, FieldValue::Str(v)) => v.clone(),
            (utype, value) => {
                return Err(field_error(format!(
                    "{} value supplied for {} field",
                    value.utype(),
                    utype
                )))
            }
        };

        let mut bytes = encoding
            .encode(&text)
            .map_err(|e| field_error(e.to_string()))?;
        if bytes.len() > field.length {
            return Err(field_error(format!(
                "{} byte(s) encoded for a {}-byte field",
                bytes.len(),
                field.length
            )));
        }
        if bytes.len() < field.length {
            let pad = encoding
                .encode(" ")
                .map_err(|e| field_error(e.to_string()))?;
            if pad.len() != 1 {
                return Err(FixrecError::Internal(format!(
                    "codepage {} pads with {} bytes per space",
                    encoding,
                    pad.len()
                )));
            }
            bytes.resize(field.length, pad[0]);
        }
        block.extend_from_slice(&bytes);
        Ok(())
    }
}

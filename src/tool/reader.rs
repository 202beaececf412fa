//! The decode-side tool adapter.

use std::sync::Arc;

use crate::batch::DecodedBatch;
use crate::decoder::Decoder;
use crate::error::FixrecError;
use crate::schema::Schema;
use crate::tool::ToolOptions;

/// A configured decode tool: the configure -> initialize -> execute rendition
/// of the `Decoder` engine.
#[derive(Debug)]
pub struct ReaderTool {
    name: String,
    schema: Arc<Schema>,
    decoder: Decoder,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl ReaderTool {
    /// Configures the tool: builds and validates the layout from `ds_schema`
    /// and binds a decoder with the resolved options.
    pub fn new(name: impl Into<String>, options: ToolOptions) -> Result<Self, FixrecError> {
        let name = name.into();
        let schema = Arc::new(options.build_schema()?);
        let decoder = Decoder::new(schema.clone(), options.decoder_options());
        log::info!("{}: configured reader tool", name);
        Ok(Self {
            name,
            schema,
            decoder,
            extra: options.extra,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Options this engine did not recognize, untouched, for the host
    /// framework to interpret.
    pub fn unrecognized(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Emits the resolved configuration as structured diagnostic events.
    pub fn initialize(&self) {
        let opts = self.decoder.options();
        log::info!(
            "{} properties: fields={} record_width={} encoding={} strict_bounds={}",
            self.name,
            self.schema.field_count(),
            self.schema.record_width(),
            opts.encoding,
            opts.strict_bounds,
        );
        log_event!(
            "event" = "initialize",
            "tool" = &self.name,
            "record_width" = &self.schema.record_width(),
            "encoding" = &opts.encoding,
            "strict_bounds" = &opts.strict_bounds,
            "blanks_as_zero" = &opts.blanks_as_zero,
            "trim_padding" = &opts.trim_padding,
        );
    }

    /// Decodes one raw block into one columnar batch. Errors propagate; under
    /// lenient strictness, bounds diagnostics ride on the returned batch.
    pub fn execute(&self, block: &[u8]) -> Result<DecodedBatch, FixrecError> {
        let batch = self.decoder.decode(block).map_err(|e| {
            log::error!("{}: problem converting block to batch: {}", self.name, e);
            e
        })?;
        log::debug!(
            "{}: batch columns {}, rows {}, diagnostics {}",
            self.name,
            batch.num_columns(),
            batch.num_rows(),
            batch.diagnostics().len(),
        );
        Ok(batch)
    }
}

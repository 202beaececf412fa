//! The generate-side tool adapter.

use std::sync::Arc;

use crate::error::FixrecError;
use crate::generator::Generator;
use crate::schema::Schema;
use crate::tool::ToolOptions;

/// A configured synthetic-data tool: the configure -> initialize -> execute
/// rendition of the `Generator` engine. Each `execute` call produces one
/// chunk of the configured row count.
#[derive(Debug)]
pub struct GeneratorTool {
    name: String,
    schema: Arc<Schema>,
    generator: Generator,
    num_rows: usize,
    seed: Option<u64>,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl GeneratorTool {
    pub fn new(name: impl Into<String>, options: ToolOptions) -> Result<Self, FixrecError> {
        let name = name.into();
        let schema = Arc::new(options.build_schema()?);
        let generator = Generator::new(schema.clone(), options.generator_options())?;
        log::info!("{}: configured generator tool", name);
        Ok(Self {
            name,
            schema,
            generator,
            num_rows: options.num_rows.unwrap_or(0),
            seed: options.seed,
            extra: options.extra,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub fn unrecognized(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra
    }

    /// Emits the resolved configuration as structured diagnostic events.
    pub fn initialize(&self) {
        let opts = self.generator.options();
        log::info!(
            "{} properties: fields={} record_width={} encoding={} num_rows={}",
            self.name,
            self.schema.field_count(),
            self.schema.record_width(),
            opts.encoding,
            self.num_rows,
        );
        log_event!(
            "event" = "initialize",
            "tool" = &self.name,
            "record_width" = &self.schema.record_width(),
            "encoding" = &opts.encoding,
            "num_rows" = &self.num_rows,
        );
    }

    /// Produces one synthetic chunk of the configured row count.
    pub fn execute(&self) -> Result<Vec<u8>, FixrecError> {
        self.generator.generate(self.num_rows, self.seed)
    }
}

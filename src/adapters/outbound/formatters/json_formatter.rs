use crate::application::read_models::QuoteReadModel;
use crate::ports::outbound::QuoteFormatter;
use crate::shared::Result;

/// JsonFormatter adapter emitting the read model as pretty-printed JSON
///
/// Field names are camelCase; SMS lines carry no `configId`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteFormatter for JsonFormatter {
    fn format(&self, model: &QuoteReadModel) -> Result<String> {
        let mut output = serde_json::to_string_pretty(model)?;
        output.push('\n');
        Ok(output)
    }
}

//! Command handlers, one module per subcommand.
//!
//! Handlers that touch data receive a ready-built [`DataFacade`]; the
//! process-wide wiring lives in [`build_facade`].

use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use fedhub_adapters::{BuiltinFallback, JsonDirTableClient, TracingNotifier};
use fedhub_core::application::ports::Notifier;
use fedhub_core::prelude::{DataFacade, RawRecord};

use crate::{
    cli::{FieldArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, ReadContext},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod list;
pub mod mutate;
pub mod status;

/// Wire the data layer for one CLI invocation.
///
/// JSON output keeps outcome lines off the terminal and sends them to the
/// log instead.
pub fn build_facade(data_dir: &Path, config: &AppConfig, output: &OutputManager) -> DataFacade {
    let notifier: Arc<dyn Notifier> = if output.format() == OutputFormat::Json {
        Arc::new(TracingNotifier::new())
    } else {
        Arc::new(output.notifier())
    };

    tracing::debug!(data_dir = %data_dir.display(), "building data facade");

    DataFacade::builder(Arc::new(JsonDirTableClient::new(data_dir)))
        .fallback(Arc::new(BuiltinFallback::new()))
        .notifier(notifier)
        .staleness(config.staleness())
        .build()
}

/// Turn `--set`/`--json` arguments into one raw record.
pub fn read_fields(fields: &FieldArgs) -> CliResult<RawRecord> {
    if let Some(json) = &fields.json {
        let text = match json.strip_prefix('@') {
            Some(path) => std::fs::read_to_string(path).for_path(path)?,
            None => json.clone(),
        };
        let value: Value = serde_json::from_str(&text).map_err(|e| CliError::Input {
            message: format!("--json is not valid JSON: {e}"),
            source: Some(e),
        })?;
        return match value {
            Value::Object(record) => Ok(record),
            other => Err(CliError::input(format!(
                "--json must be an object, got {}",
                json_kind(&other)
            ))),
        };
    }

    if fields.set.is_empty() {
        return Err(CliError::input("no fields given"));
    }

    Ok(fields
        .set
        .iter()
        .map(|(field, value)| (field.clone(), parse_value(value)))
        .collect())
}

/// JSON when the text parses as JSON, otherwise the text itself.
fn parse_value(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//! Implementation of the `fedhub list` command.

use serde_json::Value;

use fedhub_core::prelude::{DataFacade, DataSource};

use crate::{
    cli::{ListArgs, ListFormat, OutputFormat},
    error::CliResult,
    output::OutputManager,
};

pub async fn execute(args: ListArgs, facade: &DataFacade, output: &OutputManager) -> CliResult<()> {
    let handle = facade.collection(args.collection);
    let summary = handle.load().await;
    let limit = args.limit.unwrap_or(usize::MAX);

    if summary.source == DataSource::Fallback {
        output.warning(&format!(
            "Showing built-in {} ({})",
            args.collection,
            summary.error.as_deref().unwrap_or("data source unavailable")
        ))?;
    }

    let format = match (args.format, output.format()) {
        (ListFormat::Table, OutputFormat::Json) => ListFormat::Json,
        (format, _) => format,
    };

    match format {
        ListFormat::Table => {
            output.header(&format!("{} ({})", args.collection, summary.count))?;
            for (id, label) in handle.labels().into_iter().take(limit) {
                output.print(&format!("  {:<24} {label}", id.as_str()))?;
            }
        }

        ListFormat::Ids => {
            for (id, _) in handle.labels().into_iter().take(limit) {
                output.print(id.as_str())?;
            }
        }

        // JSON bypasses quiet mode so pipes always get parseable output.
        ListFormat::Json => {
            let records: Vec<Value> = handle
                .records()
                .into_iter()
                .take(limit)
                .map(Value::Object)
                .collect();
            output.json(&Value::Array(records))?;
        }
    }

    Ok(())
}

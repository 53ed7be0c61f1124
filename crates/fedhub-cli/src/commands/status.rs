//! `fedhub status`: load collections and report their cache state.

use fedhub_core::prelude::{Collection, DataFacade, DataSource};

use crate::{
    cli::{OutputFormat, StatusArgs},
    error::CliResult,
    output::{OutputManager, summary_json},
};

pub async fn execute(
    args: StatusArgs,
    facade: &DataFacade,
    output: &OutputManager,
) -> CliResult<()> {
    let summaries = match (args.view, args.collections.is_empty()) {
        (Some(view), _) => facade.load_view(view).await,
        (None, true) => facade.load(&Collection::ALL).await,
        (None, false) => facade.load(&args.collections).await,
    };

    if output.format() == OutputFormat::Json {
        let values = summaries.iter().map(summary_json).collect();
        output.json(&serde_json::Value::Array(values))?;
        return Ok(());
    }

    if let Some(view) = args.view {
        output.header(&format!("View: {view}"))?;
    }
    output.summary_table(&summaries)?;

    let fallback = summaries
        .iter()
        .filter(|s| s.source == DataSource::Fallback)
        .count();
    if fallback > 0 {
        output.warning(&format!("{fallback} collection(s) are showing built-in data"))?;
    }

    Ok(())
}

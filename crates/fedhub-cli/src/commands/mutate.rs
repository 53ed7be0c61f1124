//! `fedhub create`, `fedhub update` and `fedhub delete`.
//!
//! Each goes through the facade's dispatcher, so the outcome line comes from
//! the notifier and the cache is refreshed before the result is printed.

use serde_json::Value;
use tracing::instrument;

use fedhub_core::prelude::{DataFacade, EntityId, RawRecord};

use crate::{
    cli::{CreateArgs, DeleteArgs, OutputFormat, UpdateArgs},
    commands::read_fields,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(collection = %args.collection))]
pub async fn create(args: CreateArgs, facade: &DataFacade, output: &OutputManager) -> CliResult<()> {
    let draft = read_fields(&args.fields)?;
    let handle = facade.collection(args.collection);

    let stored = handle.create(draft).await?;
    print_record(output, stored)
}

#[instrument(skip_all, fields(collection = %args.collection, id = %args.id))]
pub async fn update(args: UpdateArgs, facade: &DataFacade, output: &OutputManager) -> CliResult<()> {
    let patch = read_fields(&args.fields)?;
    let handle = facade.collection(args.collection);

    // Patches are checked against the current entity, so load it first.
    handle.load().await;
    let stored = handle.update(&EntityId::new(args.id), patch).await?;
    print_record(output, stored)
}

#[instrument(skip_all, fields(collection = %args.collection, id = %args.id))]
pub async fn delete(args: DeleteArgs, facade: &DataFacade, output: &OutputManager) -> CliResult<()> {
    let handle = facade.collection(args.collection);
    handle.load().await;
    handle.delete(&EntityId::new(args.id)).await?;
    Ok(())
}

/// The stored record as JSON, or just its id for scripts.
fn print_record(output: &OutputManager, record: RawRecord) -> CliResult<()> {
    if output.format() == OutputFormat::Json {
        output.json(&Value::Object(record))?;
        return Ok(());
    }

    if let Some(id) = record.get("id") {
        let id = match id {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        output.print(&id)?;
    }
    Ok(())
}

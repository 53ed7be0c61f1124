//! Integration tests for fedhub-core, driven through the public API only.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fedhub_core::application::ports::{FallbackProvider, Notifier, Outcome, Query, Severity};
use fedhub_core::prelude::*;
use serde_json::json;

/// Table client over a plain map, enough to exercise the facade end to end.
#[derive(Default)]
struct MapClient {
    tables: Mutex<HashMap<Collection, Vec<RawRecord>>>,
    next_id: Mutex<u32>,
    offline: Mutex<bool>,
}

impl MapClient {
    fn seed(&self, collection: Collection, rows: Vec<serde_json::Value>) {
        let rows = rows
            .into_iter()
            .map(|row| serde_json::from_value(row).unwrap())
            .collect();
        self.tables.lock().unwrap().insert(collection, rows);
    }

    fn set_offline(&self, offline: bool) {
        *self.offline.lock().unwrap() = offline;
    }

    fn check_online(&self) -> Result<(), RemoteError> {
        if *self.offline.lock().unwrap() {
            Err(RemoteError::connectivity("service unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TableClient for MapClient {
    async fn fetch_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<RawRecord>, RemoteError> {
        self.check_online()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .get(&collection)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default())
    }

    async fn insert(
        &self,
        collection: Collection,
        mut record: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        self.check_online()?;
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        record.insert("id".into(), json!(format!("new-{next}")));
        self.tables
            .lock()
            .unwrap()
            .entry(collection)
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &EntityId,
        patch: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .get_mut(&collection)
            .and_then(|rows| rows.iter_mut().find(|r| r["id"] == json!(id.as_str())))
            .ok_or_else(|| RemoteError::not_found(format!("no row {id}")))?;
        row.extend(patch);
        Ok(row.clone())
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), RemoteError> {
        self.check_online()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.entry(collection).or_default();
        let before = rows.len();
        rows.retain(|r| r["id"] != json!(id.as_str()));
        if rows.len() == before {
            return Err(RemoteError::not_found(format!("no row {id}")));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Outcomes(Mutex<Vec<Outcome>>);

impl Notifier for Outcomes {
    fn report(&self, outcome: Outcome) {
        self.0.lock().unwrap().push(outcome);
    }
}

struct OneTeam;

impl FallbackProvider for OneTeam {
    fn records(&self, collection: Collection) -> Vec<RawRecord> {
        match collection {
            Collection::Teams => vec![
                serde_json::from_value(json!({ "id": "fb-1", "name": "Placeholder" })).unwrap(),
            ],
            _ => Vec::new(),
        }
    }
}

fn facade(client: Arc<MapClient>, outcomes: Arc<Outcomes>) -> DataFacade {
    DataFacade::builder(client)
        .notifier(outcomes)
        .fallback(Arc::new(OneTeam))
        .build()
}

#[tokio::test]
async fn every_mutation_reports_exactly_once() {
    let client = Arc::new(MapClient::default());
    let outcomes = Arc::new(Outcomes::default());
    let facade = facade(client.clone(), outcomes.clone());

    let created = facade
        .teams()
        .create(serde_json::from_value(json!({ "name": "Boavista FC" })).unwrap())
        .await
        .unwrap();
    facade
        .teams()
        .update(
            &created.id,
            serde_json::from_value(json!({ "city": "Praia" })).unwrap(),
        )
        .await
        .unwrap();
    facade.teams().delete(&created.id).await.unwrap();
    let second_delete = facade.teams().delete(&created.id).await;

    assert!(second_delete.is_err());
    let severities: Vec<Severity> = outcomes
        .0
        .lock()
        .unwrap()
        .iter()
        .map(|o| o.severity)
        .collect();
    assert_eq!(
        severities,
        vec![
            Severity::Success,
            Severity::Success,
            Severity::Success,
            Severity::Destructive
        ]
    );
    assert!(facade.teams().snapshot().is_empty());
}

#[tokio::test]
async fn fallback_then_recovery() {
    let client = Arc::new(MapClient::default());
    client.seed(
        Collection::Teams,
        vec![json!({ "id": "t1", "nome": "CD Travadores", "ilha": "Santiago" })],
    );
    client.set_offline(true);
    let facade = facade(client.clone(), Arc::new(Outcomes::default()));

    let first = facade.teams().ensure_loaded().await;
    assert_eq!(first.source, DataSource::Fallback);
    assert_eq!(first.data[0].name, "Placeholder");

    client.set_offline(false);
    let recovered = facade.teams().refresh().await;
    assert_eq!(recovered.source, DataSource::Remote);
    assert_eq!(recovered.data[0].island, "Santiago");
    assert!(recovered.error.is_none());
}

#[tokio::test]
async fn write_failure_leaves_snapshot_untouched() {
    let client = Arc::new(MapClient::default());
    client.seed(Collection::News, vec![json!({ "id": "n1", "title": "Final four" })]);
    let outcomes = Arc::new(Outcomes::default());
    let facade = facade(client.clone(), outcomes.clone());
    let before = facade.news().ensure_loaded().await;

    client.set_offline(true);
    let result = facade
        .news()
        .update(
            &EntityId::new("n1"),
            serde_json::from_value(json!({ "title": "Final eight" })).unwrap(),
        )
        .await;

    assert!(result.unwrap_err().is_retryable());
    assert_eq!(facade.news().snapshot().data, before.data);
    let reported = outcomes.0.lock().unwrap();
    assert_eq!(reported.len(), 1);
    assert_eq!(reported[0].description, "service unreachable");
}

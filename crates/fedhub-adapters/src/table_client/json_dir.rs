//! Table client over a directory of JSON files.
//!
//! Each collection is one `<table>.json` file holding an array of rows,
//! e.g. `data/regional_associations.json`. Reads and writes go through
//! `tokio::fs`; writes replace the file atomically (write then rename).

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use fedhub_core::{
    application::{
        RemoteError,
        ports::{Query, TableClient},
    },
    domain::{Collection, EntityId, RawRecord},
};

use super::{apply_patch, insert_row, missing_row, row_has_id, select};

/// Production-style table client backed by a data directory.
#[derive(Debug)]
pub struct JsonDirTableClient {
    root: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl JsonDirTableClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing a collection.
    pub fn table_path(&self, collection: Collection) -> PathBuf {
        self.root.join(format!("{}.json", collection.as_str()))
    }

    async fn ensure_root(&self) -> Result<(), RemoteError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(RemoteError::connectivity(format!(
                "data path {} is not a directory",
                self.root.display()
            ))),
            Err(e) => Err(RemoteError::connectivity(format!(
                "data directory {} is unreachable: {}",
                self.root.display(),
                e
            ))),
        }
    }

    async fn read_table(&self, collection: Collection) -> Result<Vec<RawRecord>, RemoteError> {
        self.ensure_root().await?;
        let path = self.table_path(collection);

        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no table file, empty collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(map_io_error(&path, e, "read")),
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| {
            RemoteError::schema_mismatch(format!(
                "{} is not an array of rows: {}",
                path.display(),
                e
            ))
        })
    }

    async fn write_table(
        &self,
        collection: Collection,
        rows: &[RawRecord],
    ) -> Result<(), RemoteError> {
        let path = self.table_path(collection);
        let staging = path.with_extension("json.tmp");
        let text = serde_json::to_string_pretty(rows)
            .map_err(|e| RemoteError::schema_mismatch(e.to_string()))?;

        tokio::fs::write(&staging, text)
            .await
            .map_err(|e| map_io_error(&staging, e, "write"))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| map_io_error(&path, e, "replace"))
    }
}

#[async_trait]
impl TableClient for JsonDirTableClient {
    #[instrument(skip(self, query), fields(collection = %collection))]
    async fn fetch_all(
        &self,
        collection: Collection,
        query: &Query,
    ) -> Result<Vec<RawRecord>, RemoteError> {
        let rows = self.read_table(collection).await?;
        Ok(select(&rows, query))
    }

    async fn insert(
        &self,
        collection: Collection,
        record: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.read_table(collection).await?;

        let stored = insert_row(&mut rows, record)?;
        self.write_table(collection, &rows).await?;
        Ok(stored)
    }

    async fn update(
        &self,
        collection: Collection,
        id: &EntityId,
        patch: RawRecord,
    ) -> Result<RawRecord, RemoteError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.read_table(collection).await?;

        let row = rows
            .iter_mut()
            .find(|row| row_has_id(row, id))
            .ok_or_else(|| missing_row(id))?;
        apply_patch(row, patch);
        let stored = row.clone();

        self.write_table(collection, &rows).await?;
        Ok(stored)
    }

    async fn delete(&self, collection: Collection, id: &EntityId) -> Result<(), RemoteError> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.read_table(collection).await?;

        let before = rows.len();
        rows.retain(|row| !row_has_id(row, id));
        if rows.len() == before {
            return Err(missing_row(id));
        }
        self.write_table(collection, &rows).await
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> RemoteError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => RemoteError::unauthorized(format!(
            "Failed to {} {}: {}",
            operation,
            path.display(),
            e
        )),
        _ => RemoteError::connectivity(format!(
            "Failed to {} {}: {}",
            operation,
            path.display(),
            e
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedhub_core::application::RemoteErrorKind;
    use serde_json::json;
    use tempfile::TempDir;

    fn raw(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn missing_directory_is_connectivity() {
        let client = JsonDirTableClient::new("/definitely/not/here");
        let err = client
            .fetch_all(Collection::Teams, &Query::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, RemoteErrorKind::Connectivity);
    }

    #[tokio::test]
    async fn missing_file_is_empty_collection() {
        let dir = TempDir::new().unwrap();
        let client = JsonDirTableClient::new(dir.path());
        let rows = client
            .fetch_all(Collection::Referees, &Query::new())
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn malformed_file_is_schema_mismatch() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("games.json"), "{ \"not\": \"an array\" }").unwrap();
        let client = JsonDirTableClient::new(dir.path());

        let err = client
            .fetch_all(Collection::Games, &Query::new())
            .await
            .unwrap_err();

        assert_eq!(err.kind, RemoteErrorKind::SchemaMismatch);
    }

    #[tokio::test]
    async fn writes_persist_to_the_table_file() {
        let dir = TempDir::new().unwrap();
        let client = JsonDirTableClient::new(dir.path());

        let stored = client
            .insert(
                Collection::RegionalAssociations,
                raw(json!({ "name": "ARBS" })),
            )
            .await
            .unwrap();
        let id = EntityId::new(stored["id"].as_str().unwrap());
        client
            .update(
                Collection::RegionalAssociations,
                &id,
                raw(json!({ "island": "Santiago" })),
            )
            .await
            .unwrap();

        let text = std::fs::read_to_string(dir.path().join("regional_associations.json")).unwrap();
        let rows: Vec<RawRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["island"], json!("Santiago"));

        client
            .delete(Collection::RegionalAssociations, &id)
            .await
            .unwrap();
        let again = client.delete(Collection::RegionalAssociations, &id).await;
        assert_eq!(again.unwrap_err().kind, RemoteErrorKind::NotFound);
    }

    #[tokio::test]
    async fn duplicate_id_is_refused_and_file_unchanged() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("teams.json"),
            r#"[{ "id": "t1", "name": "Old" }]"#,
        )
        .unwrap();
        let client = JsonDirTableClient::new(dir.path());

        let err = client
            .insert(Collection::Teams, raw(json!({ "id": "t1", "name": "New" })))
            .await
            .unwrap_err();

        assert_eq!(err.kind, RemoteErrorKind::Other);
        let rows = client
            .fetch_all(Collection::Teams, &Query::new())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("Old"));
    }
}

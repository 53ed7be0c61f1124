//! Table client adapters.
//!
//! Both clients share the row semantics of the hosted service: the remote
//! assigns ids, stamps `created_at`/`updated_at`, merges updates into the
//! stored row and answers `NotFound` for rows it does not have.

pub mod json_dir;
pub mod memory;

pub use json_dir::JsonDirTableClient;
pub use memory::MemoryTableClient;

use std::cmp::Ordering;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use fedhub_core::{
    application::{RemoteError, RemoteErrorKind, ports::Query},
    domain::{EntityId, RawRecord},
};

/// Filter and order rows the way the remote would.
pub(crate) fn select(rows: &[RawRecord], query: &Query) -> Vec<RawRecord> {
    let mut selected: Vec<RawRecord> = rows.iter().filter(|row| query.matches(row)).cloned().collect();

    if let Some(order) = &query.order_by {
        selected.sort_by(|a, b| {
            let ordering = compare_values(a.get(&order.column), b.get(&order.column));
            if order.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
    selected
}

/// Nulls and missing columns sort last in ascending order.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a.filter(|v| !v.is_null()), b.filter(|v| !v.is_null())) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.to_lowercase().cmp(&y.to_lowercase()),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

/// Assign an id (when absent or blank) and stamp a row about to be inserted.
fn prepare_insert(mut record: RawRecord) -> RawRecord {
    let has_id = match record.get("id") {
        Some(Value::String(id)) => !id.trim().is_empty(),
        Some(Value::Number(_)) => true,
        _ => false,
    };
    if !has_id {
        record.insert("id".into(), Value::String(Uuid::new_v4().to_string()));
    }

    let now = Value::String(Utc::now().to_rfc3339());
    record.insert("created_at".into(), now.clone());
    record.insert("updated_at".into(), now);
    record
}

/// Insert a prepared row, refusing an id the table already holds.
pub(crate) fn insert_row(rows: &mut Vec<RawRecord>, record: RawRecord) -> Result<RawRecord, RemoteError> {
    let stored = prepare_insert(record);
    if let Some(id) = id_of(&stored) {
        if rows.iter().any(|row| row_has_id(row, &id)) {
            return Err(RemoteError::new(
                RemoteErrorKind::Other,
                format!("duplicate key: a row with id '{id}' already exists"),
            ));
        }
    }
    rows.push(stored.clone());
    Ok(stored)
}

fn id_of(row: &RawRecord) -> Option<EntityId> {
    match row.get("id") {
        Some(Value::String(s)) => Some(EntityId::new(s.clone())),
        Some(Value::Number(n)) => Some(EntityId::new(n.to_string())),
        _ => None,
    }
}

/// Merge a patch into a stored row. The row keeps its id.
pub(crate) fn apply_patch(row: &mut RawRecord, patch: RawRecord) {
    for (column, value) in patch {
        if column != "id" {
            row.insert(column, value);
        }
    }
    row.insert("updated_at".into(), Value::String(Utc::now().to_rfc3339()));
}

pub(crate) fn row_has_id(row: &RawRecord, id: &EntityId) -> bool {
    match row.get("id") {
        Some(Value::String(s)) => s == id.as_str(),
        Some(Value::Number(n)) => n.to_string() == id.as_str(),
        _ => false,
    }
}

pub(crate) fn missing_row(id: &EntityId) -> RemoteError {
    RemoteError::not_found(format!("no row with id '{id}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn select_orders_with_nulls_last() {
        let rows = vec![
            raw(json!({ "id": "a", "game_date": "2024-05-02" })),
            raw(json!({ "id": "b" })),
            raw(json!({ "id": "c", "game_date": "2024-05-01" })),
        ];
        let query = Query::new().order_by("game_date", true);

        let ids: Vec<_> = select(&rows, &query)
            .iter()
            .map(|r| r["id"].clone())
            .collect();

        assert_eq!(ids, vec![json!("c"), json!("a"), json!("b")]);
    }

    #[test]
    fn select_applies_equality_filters() {
        let rows = vec![
            raw(json!({ "id": "p1", "team_id": "t1" })),
            raw(json!({ "id": "p2", "team_id": "t2" })),
        ];
        let selected = select(&rows, &Query::new().filter("team_id", "t2"));
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0]["id"], json!("p2"));
    }

    #[test]
    fn insert_assigns_id_only_when_blank() {
        let fresh = prepare_insert(raw(json!({ "id": "", "name": "X" })));
        assert!(fresh["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(fresh.contains_key("created_at"));

        let kept = prepare_insert(raw(json!({ "id": "given" })));
        assert_eq!(kept["id"], json!("given"));
    }

    #[test]
    fn insert_refuses_an_existing_id() {
        let mut rows = vec![raw(json!({ "id": "t1", "name": "Old" }))];

        let err = insert_row(&mut rows, raw(json!({ "id": "t1", "name": "New" }))).unwrap_err();

        assert_eq!(err.kind, RemoteErrorKind::Other);
        assert!(err.message.contains("duplicate key"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], json!("Old"));
    }

    #[test]
    fn numeric_and_string_ids_collide() {
        let mut rows = vec![raw(json!({ "id": 7 }))];
        assert!(insert_row(&mut rows, raw(json!({ "id": "7" }))).is_err());
        assert!(insert_row(&mut rows, raw(json!({ "name": "fresh" }))).is_ok());
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn patch_cannot_change_id() {
        let mut row = raw(json!({ "id": "g1", "home_score": 0 }));
        apply_patch(&mut row, raw(json!({ "id": "g2", "home_score": 78 })));
        assert_eq!(row["id"], json!("g1"));
        assert_eq!(row["home_score"], json!(78));
    }
}

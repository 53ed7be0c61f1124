use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, ScheduleStatus};

/// A federation event: clinics, galas, assemblies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EntityId,
    pub title: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ScheduleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Event {
    const COLLECTION: Collection = Collection::Events;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.start_date {
            Some(date) => format!("{date} {}", self.title),
            None => self.title.clone(),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        let start_date = fields.date(&["start_date", "event_date", "date", "data"]);
        Self {
            id,
            title: fields.text_or_default(&["title", "name", "titulo"]),
            description: fields.text_or_default(&["description", "descricao"]),
            start_date,
            end_date: fields.date(&["end_date", "data_fim"]).or(start_date),
            location: fields.text_or_default(&["location", "venue", "local"]),
            kind: fields.text_or_default(&["type", "event_type", "tipo"]),
            status: fields.vocabulary(&["status", "estado"]),
            updated_at: fields.updated_at(),
        }
    }
}

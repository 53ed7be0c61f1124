use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// A competing team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
    pub city: String,
    pub island: String,
    pub founded_year: Option<i32>,
    pub logo_url: Option<String>,
    pub status: LifecycleStatus,
    pub club_id: Option<EntityId>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn is_active(&self) -> bool {
        self.status == LifecycleStatus::Active
    }
}

impl Entity for Team {
    const COLLECTION: Collection = Collection::Teams;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        if self.abbreviation.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.abbreviation)
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: fields.text_or_default(&["name", "nome", "team_name"]),
            abbreviation: fields.text_or_default(&["abbreviation", "short_name", "sigla"]),
            city: fields.text_or_default(&["city", "home_city", "cidade"]),
            island: fields.text_or_default(&["island", "ilha"]),
            founded_year: founded_year(fields),
            logo_url: fields.text(&["logo_url", "logo"]),
            status: status_or_active_flag(fields),
            club_id: fields.text(&["club_id", "clube_id"]).map(EntityId::from),
            updated_at: fields.updated_at(),
        }
    }
}

pub(crate) fn founded_year(fields: &Fields<'_>) -> Option<i32> {
    fields
        .int(&["founded_year", "founded", "foundation_year", "ano_fundacao"])
        .and_then(|year| i32::try_from(year).ok())
        .filter(|year| *year > 0)
}

/// Lifecycle status from `status`, or from a legacy boolean `active` column.
pub(crate) fn status_or_active_flag(fields: &Fields<'_>) -> LifecycleStatus {
    if fields.text(&["status", "estado"]).is_some() {
        return fields.vocabulary(&["status", "estado"]);
    }
    match fields.raw().get("active").and_then(|v| v.as_bool()) {
        Some(false) => LifecycleStatus::Inactive,
        _ => LifecycleStatus::Active,
    }
}

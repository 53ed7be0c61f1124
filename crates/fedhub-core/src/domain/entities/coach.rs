use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Contact, PersonName};
use super::team::status_or_active_flag;
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// A team coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    pub id: EntityId,
    pub name: String,
    pub license_level: String,
    pub team_id: Option<EntityId>,
    pub nationality: String,
    #[serde(flatten)]
    pub contact: Contact,
    pub status: LifecycleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Coach {
    const COLLECTION: Collection = Collection::Coaches;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        self.name.clone()
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: PersonName::from_fields(fields).display,
            license_level: fields.text_or_default(&["license_level", "level", "nivel"]),
            team_id: fields.text(&["team_id", "equipa_id"]).map(EntityId::from),
            nationality: fields.text_or_default(&["nationality", "nacionalidade"]),
            contact: Contact::from_fields(fields),
            status: status_or_active_flag(fields),
            updated_at: fields.updated_at(),
        }
    }
}

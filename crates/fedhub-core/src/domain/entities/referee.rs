use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{Contact, PersonName};
use super::team::status_or_active_flag;
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// A licensed referee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referee {
    pub id: EntityId,
    pub name: String,
    pub license_number: String,
    /// Grade: national, regional, international.
    pub category: String,
    pub island: String,
    #[serde(flatten)]
    pub contact: Contact,
    pub status: LifecycleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Referee {
    const COLLECTION: Collection = Collection::Referees;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.category.as_str() {
            "" => self.name.clone(),
            category => format!("{} ({category})", self.name),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: PersonName::from_fields(fields).display,
            license_number: fields.text_or_default(&["license_number", "licenca", "license"]),
            category: fields.text_or_default(&["category", "level", "categoria"]),
            island: fields.text_or_default(&["island", "ilha"]),
            contact: Contact::from_fields(fields),
            status: status_or_active_flag(fields),
            updated_at: fields.updated_at(),
        }
    }
}

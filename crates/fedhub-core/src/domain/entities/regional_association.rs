use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Contact;
use super::team::status_or_active_flag;
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// An island-level association that clubs affiliate to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalAssociation {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
    pub island: String,
    pub president: String,
    #[serde(flatten)]
    pub contact: Contact,
    pub status: LifecycleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for RegionalAssociation {
    const COLLECTION: Collection = Collection::RegionalAssociations;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.island.as_str() {
            "" => self.name.clone(),
            island => format!("{} ({island})", self.name),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: fields.text_or_default(&["name", "nome"]),
            abbreviation: fields.text_or_default(&["abbreviation", "acronym", "sigla"]),
            island: fields.text_or_default(&["island", "ilha", "region", "regiao"]),
            president: fields.text_or_default(&["president", "presidente"]),
            contact: Contact::from_fields(fields),
            status: status_or_active_flag(fields),
            updated_at: fields.updated_at(),
        }
    }
}

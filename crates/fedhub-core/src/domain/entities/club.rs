use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Contact;
use super::team::{founded_year, status_or_active_flag};
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// A member club, affiliated to a regional association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
    pub island: String,
    pub city: String,
    #[serde(flatten)]
    pub contact: Contact,
    pub founded_year: Option<i32>,
    pub regional_association_id: Option<EntityId>,
    pub logo_url: Option<String>,
    pub status: LifecycleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Club {
    const COLLECTION: Collection = Collection::Clubs;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.island.as_str() {
            "" => self.name.clone(),
            island => format!("{} - {}", self.name, island),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: fields.text_or_default(&["name", "nome", "club_name"]),
            abbreviation: fields.text_or_default(&["abbreviation", "short_name", "sigla"]),
            island: fields.text_or_default(&["island", "ilha"]),
            city: fields.text_or_default(&["city", "cidade"]),
            contact: Contact::from_fields(fields),
            founded_year: founded_year(fields),
            regional_association_id: fields
                .text(&[
                    "regional_association_id",
                    "association_id",
                    "associacao_id",
                ])
                .map(EntityId::from),
            logo_url: fields.text(&["logo_url", "logo"]),
            status: status_or_active_flag(fields),
            updated_at: fields.updated_at(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Contact;
use super::team::founded_year;
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId};

/// A national federation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Federation {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
    pub president: String,
    pub founded_year: Option<i32>,
    #[serde(flatten)]
    pub contact: Contact,
    pub logo_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Federation {
    const COLLECTION: Collection = Collection::Federations;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.abbreviation.as_str() {
            "" => self.name.clone(),
            abbreviation => format!("{abbreviation} - {}", self.name),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: fields.text_or_default(&["name", "nome"]),
            abbreviation: fields.text_or_default(&["abbreviation", "acronym", "sigla"]),
            president: fields.text_or_default(&["president", "presidente"]),
            founded_year: founded_year(fields),
            contact: Contact::from_fields(fields),
            logo_url: fields.text(&["logo_url", "logo"]),
            updated_at: fields.updated_at(),
        }
    }
}

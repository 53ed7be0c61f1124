use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::common::PersonName;
use super::team::status_or_active_flag;
use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, LifecycleStatus};

/// A registered player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    /// Display name; derived from first/last name when the row has none.
    pub name: String,
    pub position: String,
    pub jersey_number: Option<u32>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub team_id: Option<EntityId>,
    pub nationality: String,
    pub status: LifecycleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Age in whole years on the given date.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        self.birth_date.and_then(|born| date.years_since(born))
    }
}

impl Entity for Player {
    const COLLECTION: Collection = Collection::Players;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.jersey_number {
            Some(number) => format!("#{number} {}", self.name),
            None => self.name.clone(),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        let name = PersonName::from_fields(fields);
        Self {
            id,
            first_name: name.first,
            last_name: name.last,
            name: name.display,
            position: fields.text_or_default(&["position", "posicao"]),
            jersey_number: fields.non_negative(&["jersey_number", "number", "numero"]),
            birth_date: fields.date(&["birth_date", "date_of_birth", "data_nascimento"]),
            height_cm: height_cm(fields),
            weight_kg: fields
                .float(&["weight_kg", "weight", "peso"])
                .filter(|w| *w > 0.0),
            team_id: fields.text(&["team_id", "equipa_id"]).map(EntityId::from),
            nationality: fields.text_or_default(&["nationality", "nacionalidade"]),
            status: status_or_active_flag(fields),
            updated_at: fields.updated_at(),
        }
    }
}

/// Height in centimetres; older rows stored metres.
fn height_cm(fields: &Fields<'_>) -> Option<f64> {
    fields
        .float(&["height_cm", "height", "altura"])
        .filter(|h| *h > 0.0)
        .map(|h| if h < 3.0 { h * 100.0 } else { h })
}

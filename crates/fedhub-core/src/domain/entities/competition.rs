use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, ScheduleStatus};

/// A league, cup or tournament for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competition {
    pub id: EntityId,
    pub name: String,
    /// Free-form type label: league, cup, tournament, friendly.
    #[serde(rename = "type")]
    pub kind: String,
    pub season: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: ScheduleStatus,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// Whether the date range covers `date`. Open-ended ranges count as covering.
    pub fn runs_on(&self, date: NaiveDate) -> bool {
        self.start_date.is_none_or(|start| start <= date)
            && self.end_date.is_none_or(|end| date <= end)
    }
}

impl Entity for Competition {
    const COLLECTION: Collection = Collection::Competitions;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        match self.season.as_str() {
            "" => self.name.clone(),
            season => format!("{} {}", self.name, season),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            name: fields.text_or_default(&["name", "nome"]),
            kind: fields.text_or_default(&["type", "competition_type", "tipo"]),
            season: fields.text_or_default(&["season", "epoca", "temporada"]),
            start_date: fields.date(&["start_date", "data_inicio"]),
            end_date: fields.date(&["end_date", "data_fim"]),
            status: fields.vocabulary(&["status", "estado"]),
            updated_at: fields.updated_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::RawRecord;
    use serde_json::json;

    #[test]
    fn season_and_type_aliases() {
        let raw: RawRecord = serde_json::from_value(json!({
            "id": 3, "nome": "Liga Nacional", "tipo": "league", "epoca": "2024/2025",
            "data_inicio": "2024-10-01", "estado": "em_curso"
        }))
        .unwrap();
        let comp = Competition::normalize(&raw).unwrap();

        assert_eq!(comp.kind, "league");
        assert_eq!(comp.summary(), "Liga Nacional 2024/2025");
        assert_eq!(comp.status, ScheduleStatus::Ongoing);
        assert!(comp.runs_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
        assert!(!comp.runs_on(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()));
    }
}

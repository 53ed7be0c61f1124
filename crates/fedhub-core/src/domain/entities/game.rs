use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::Entity;
use crate::domain::DomainError;
use crate::domain::common::Fields;
use crate::domain::value_objects::{Collection, EntityId, GameStatus};

/// A scheduled or played game between two teams.
///
/// The date and time columns are written back as `game_date`/`game_time`,
/// the columns the games table is ordered by; `scheduled_date` and
/// `scheduled_time` are accepted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: EntityId,
    pub home_team_id: EntityId,
    pub away_team_id: EntityId,
    pub competition_id: Option<EntityId>,
    #[serde(rename = "game_date")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(rename = "game_time")]
    pub scheduled_time: Option<NaiveTime>,
    pub venue: String,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub status: GameStatus,
    pub round: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Game {
    /// Score pair, only meaningful once the game has left `Scheduled`.
    pub fn score(&self) -> Option<(u32, u32)> {
        if self.status == GameStatus::Scheduled {
            return None;
        }
        Some((self.home_score?, self.away_score?))
    }

    /// Winning side's team id, if the game is finished and not drawn.
    pub fn winner(&self) -> Option<&EntityId> {
        if self.status != GameStatus::Finished {
            return None;
        }
        let (home, away) = self.score()?;
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Some(&self.home_team_id),
            std::cmp::Ordering::Less => Some(&self.away_team_id),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl Entity for Game {
    const COLLECTION: Collection = Collection::Games;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn summary(&self) -> String {
        let date = self
            .scheduled_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "TBD".into());
        match self.score() {
            Some((home, away)) => format!(
                "{date} {} {home}-{away} {} [{}]",
                self.home_team_id, self.away_team_id, self.status
            ),
            None => format!(
                "{date} {} vs {} [{}]",
                self.home_team_id, self.away_team_id, self.status
            ),
        }
    }

    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self {
        Self {
            id,
            home_team_id: fields
                .text(&["home_team_id", "home_team", "equipa_casa_id"])
                .map(EntityId::from)
                .unwrap_or_else(EntityId::unassigned),
            away_team_id: fields
                .text(&["away_team_id", "away_team", "equipa_fora_id"])
                .map(EntityId::from)
                .unwrap_or_else(EntityId::unassigned),
            competition_id: fields
                .text(&["competition_id", "competicao_id"])
                .map(EntityId::from),
            scheduled_date: fields.date(&["game_date", "scheduled_date", "date", "data"]),
            scheduled_time: fields.time(&["game_time", "scheduled_time", "time", "hora"]),
            venue: fields.text_or_default(&["venue", "location", "local", "pavilhao"]),
            home_score: fields.non_negative(&["home_score", "score_home", "pontos_casa"]),
            away_score: fields.non_negative(&["away_score", "score_away", "pontos_fora"]),
            status: fields.vocabulary(&["status", "estado"]),
            round: fields.text(&["round", "jornada"]),
            updated_at: fields.updated_at(),
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.home_team_id.is_assigned() && self.home_team_id == self.away_team_id {
            return Err(DomainError::SameTeams {
                team_id: self.home_team_id.to_string(),
            });
        }
        Ok(())
    }
}

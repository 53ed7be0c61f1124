//! Domain value objects: collections, views, identities and status vocabularies.
//!
//! # Design
//!
//! These are pure value types, equality-by-value with no identity of their
//! own. Collection metadata (table names, staleness class, default ordering)
//! lives in `catalog.rs`; this file only defines the types, their string
//! representations and their `FromStr` parsers.
//!
//! # Status vocabularies
//!
//! The remote tables carry statuses in Portuguese and in older English
//! spellings. Every vocabulary here has one canonical English spelling
//! (what `as_str` returns and what serde writes) and accepts the historical
//! spellings in `FromStr`.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Collection ───────────────────────────────────────────────────────────────

/// A named set of same-typed domain entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Teams,
    Clubs,
    Players,
    Games,
    Competitions,
    News,
    Events,
    Referees,
    Federations,
    RegionalAssociations,
    Coaches,
}

impl Collection {
    pub const ALL: [Collection; 11] = [
        Self::Teams,
        Self::Clubs,
        Self::Players,
        Self::Games,
        Self::Competitions,
        Self::News,
        Self::Events,
        Self::Referees,
        Self::Federations,
        Self::RegionalAssociations,
        Self::Coaches,
    ];

    /// The remote table backing this collection.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teams => "teams",
            Self::Clubs => "clubs",
            Self::Players => "players",
            Self::Games => "games",
            Self::Competitions => "competitions",
            Self::News => "news",
            Self::Events => "events",
            Self::Referees => "referees",
            Self::Federations => "federations",
            Self::RegionalAssociations => "regional_associations",
            Self::Coaches => "coaches",
        }
    }

    /// How quickly this collection changes on the remote.
    pub fn volatility(self) -> Volatility {
        crate::domain::catalog::find_collection(self)
            .map(|def| def.volatility)
            .unwrap_or(Volatility::Medium)
    }

    /// Singular, human-readable label used in outcome messages.
    pub fn label(self) -> &'static str {
        crate::domain::catalog::find_collection(self)
            .map(|def| def.singular)
            .unwrap_or("Record")
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "teams" | "team" | "equipas" => Ok(Self::Teams),
            "clubs" | "club" | "clubes" => Ok(Self::Clubs),
            "players" | "player" | "jogadores" => Ok(Self::Players),
            "games" | "game" | "jogos" => Ok(Self::Games),
            "competitions" | "competition" | "competicoes" => Ok(Self::Competitions),
            "news" | "noticias" => Ok(Self::News),
            "events" | "event" | "eventos" => Ok(Self::Events),
            "referees" | "referee" | "arbitros" => Ok(Self::Referees),
            "federations" | "federation" | "federacoes" => Ok(Self::Federations),
            "regional_associations" | "regional_association" | "associations"
            | "associacoes" => Ok(Self::RegionalAssociations),
            "coaches" | "coach" | "treinadores" => Ok(Self::Coaches),
            other => Err(DomainError::UnknownCollection(other.to_string())),
        }
    }
}

// ── Volatility ───────────────────────────────────────────────────────────────

/// Staleness class of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    /// Fast-changing: games, news.
    High,
    /// General entities.
    Medium,
    /// Slow-changing reference data.
    Low,
}

// ── View ─────────────────────────────────────────────────────────────────────

/// A presentation view and the collections it needs loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Games,
    Teams,
    News,
    Organizations,
    Admin,
}

impl View {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Games => "games",
            Self::Teams => "teams",
            Self::News => "news",
            Self::Organizations => "organizations",
            Self::Admin => "admin",
        }
    }

    /// Collections this view reads.
    pub fn collections(self) -> &'static [Collection] {
        crate::domain::catalog::view_collections(self)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" | "index" => Ok(Self::Home),
            "games" | "calendar" => Ok(Self::Games),
            "teams" => Ok(Self::Teams),
            "news" => Ok(Self::News),
            "organizations" | "orgs" => Ok(Self::Organizations),
            "admin" | "dashboard" => Ok(Self::Admin),
            other => Err(DomainError::UnknownView(other.to_string())),
        }
    }
}

// ── EntityId ─────────────────────────────────────────────────────────────────

/// Stable identity of an entity within its collection.
///
/// Remote ids arrive as strings (UUIDs) or integers; both are kept as text.
/// An empty id marks a draft the remote has not assigned an identity yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity of a record not yet persisted.
    pub fn unassigned() -> Self {
        Self(String::new())
    }

    pub fn is_assigned(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ── Status vocabularies ──────────────────────────────────────────────────────

/// Active/inactive lifecycle shared by teams, clubs, people and associations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStatus {
    #[default]
    Active,
    Inactive,
}

impl LifecycleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for LifecycleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "ativo" | "ativa" | "true" => Ok(Self::Active),
            "inactive" | "inativo" | "inativa" | "suspended" | "suspenso" | "false" => {
                Ok(Self::Inactive)
            }
            other => Err(DomainError::InvalidStatus {
                vocabulary: "lifecycle",
                value: other.to_string(),
            }),
        }
    }
}

/// Canonical game status.
///
/// | Canonical   | Accepted on input                                    |
/// |-------------|------------------------------------------------------|
/// | `scheduled` | scheduled, agendado, marcado                          |
/// | `live`      | live, in_progress, em_andamento, ao_vivo              |
/// | `finished`  | finished, completed, finalizado, terminado, concluido |
/// | `cancelled` | cancelled, canceled, cancelado                        |
/// | `postponed` | postponed, adiado                                     |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Finished,
    Cancelled,
    Postponed,
}

impl GameStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Live => "live",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
            Self::Postponed => "postponed",
        }
    }
}

impl FromStr for GameStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "scheduled" | "agendado" | "marcado" => Ok(Self::Scheduled),
            "live" | "in_progress" | "em_andamento" | "ao_vivo" | "a_decorrer" => Ok(Self::Live),
            "finished" | "completed" | "finalizado" | "terminado" | "concluido" => {
                Ok(Self::Finished)
            }
            "cancelled" | "canceled" | "cancelado" => Ok(Self::Cancelled),
            "postponed" | "adiado" => Ok(Self::Postponed),
            other => Err(DomainError::InvalidStatus {
                vocabulary: "game",
                value: other.to_string(),
            }),
        }
    }
}

/// Status of anything with a date range: competitions and events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    #[default]
    Upcoming,
    Ongoing,
    Finished,
    Cancelled,
}

impl ScheduleStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Finished => "finished",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "upcoming" | "planned" | "scheduled" | "agendado" | "agendada" | "planeado" => {
                Ok(Self::Upcoming)
            }
            "ongoing" | "active" | "in_progress" | "em_curso" | "a_decorrer" | "ativo"
            | "ativa" => Ok(Self::Ongoing),
            "finished" | "completed" | "finalizado" | "finalizada" | "concluido"
            | "concluida" => Ok(Self::Finished),
            "cancelled" | "canceled" | "cancelado" | "cancelada" => Ok(Self::Cancelled),
            other => Err(DomainError::InvalidStatus {
                vocabulary: "schedule",
                value: other.to_string(),
            }),
        }
    }
}

/// Editorial status of a news item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsStatus {
    #[default]
    Draft,
    Pending,
    Published,
}

impl NewsStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Published => "published",
        }
    }
}

impl FromStr for NewsStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" | "rascunho" => Ok(Self::Draft),
            "pending" | "pendente" | "review" => Ok(Self::Pending),
            "published" | "publicado" | "publicada" => Ok(Self::Published),
            other => Err(DomainError::InvalidStatus {
                vocabulary: "news",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! impl_status_display {
    ($($ty:ty),+) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })+
    };
}

impl_status_display!(LifecycleStatus, GameStatus, ScheduleStatus, NewsStatus);

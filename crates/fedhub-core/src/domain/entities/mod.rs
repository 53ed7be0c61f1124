//! Canonical entities and their normalizers.
//!
//! Each entity module owns exactly one pure mapping from a raw record to its
//! canonical shape (`Entity::from_fields`). The mapping is total: any record
//! that carries an identity normalizes, with defaults for whatever else is
//! missing. Identity is the only required field.

pub mod club;
pub mod coach;
pub mod common;
pub mod competition;
pub mod event;
pub mod federation;
pub mod game;
pub mod news;
pub mod player;
pub mod referee;
pub mod regional_association;
pub mod team;

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::common::{Fields, RawRecord};
use crate::domain::value_objects::{Collection, EntityId};

pub use crate::domain::DomainError;
pub use club::Club;
pub use coach::Coach;
pub use common::Contact;
pub use competition::Competition;
pub use event::Event;
pub use federation::Federation;
pub use game::Game;
pub use news::NewsItem;
pub use player::Player;
pub use referee::Referee;
pub use regional_association::RegionalAssociation;
pub use team::Team;

/// A canonical domain entity stored in one collection.
pub trait Entity: Clone + fmt::Debug + PartialEq + Serialize + Send + Sync + 'static {
    /// The collection this entity lives in.
    const COLLECTION: Collection;

    fn id(&self) -> &EntityId;

    /// One-line human label ("CD Travadores", "Travadores vs ABC").
    fn summary(&self) -> String;

    /// Build the canonical entity from an already-extracted identity.
    ///
    /// Must not fail: absent optional fields get defaults.
    fn from_fields(id: EntityId, fields: &Fields<'_>) -> Self;

    /// Domain invariants checked at the write boundary and on fetched rows.
    fn validate(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Normalize a fetched record. Rejects records without an identity or
    /// that break an entity invariant.
    fn normalize(raw: &RawRecord) -> Result<Self, DomainError> {
        let fields = Fields::new(raw);
        let id = fields
            .id()
            .ok_or(DomainError::MissingRequiredField { field: "id" })?;
        let entity = Self::from_fields(id, &fields);
        entity.validate()?;
        Ok(entity)
    }

    /// Normalize a record that has not been persisted yet.
    fn normalize_draft(raw: &RawRecord) -> Self {
        let fields = Fields::new(raw);
        Self::from_fields(fields.id().unwrap_or_else(EntityId::unassigned), &fields)
    }

    /// Canonical entity as a flat record for the remote table.
    fn to_record(&self) -> RawRecord {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => RawRecord::new(),
        }
    }
}

/// Result of normalizing a batch of raw records.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub entities: Vec<T>,
    /// Records dropped for a missing identity, a broken invariant or a
    /// duplicate identity.
    pub rejected: usize,
}

/// Normalize a fetched batch, dropping (and logging) unusable records.
///
/// Input order is preserved. When two records share an identity, the first
/// one wins.
pub fn normalize_all<T: Entity>(records: &[RawRecord]) -> Normalized<T> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut entities = Vec::with_capacity(records.len());
    let mut rejected = 0;

    for (index, raw) in records.iter().enumerate() {
        match T::normalize(raw) {
            Ok(entity) if seen.insert(entity.id().clone()) => entities.push(entity),
            Ok(entity) => {
                rejected += 1;
                warn!(
                    collection = %T::COLLECTION,
                    id = %entity.id(),
                    index,
                    "duplicate identity dropped"
                );
            }
            Err(e) => {
                rejected += 1;
                warn!(
                    collection = %T::COLLECTION,
                    index,
                    error = %e,
                    "record dropped during normalization"
                );
            }
        }
    }

    Normalized { entities, rejected }
}

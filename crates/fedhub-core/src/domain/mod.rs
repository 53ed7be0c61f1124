//! Core domain layer for fedhub.
//!
//! This module contains the canonical entities, their normalizers and the
//! collection catalog. It performs no I/O: raw records come in, canonical
//! entities go out.
//!
//! ## Layout
//!
//! - `value_objects`: collections, views, identities, status vocabularies
//! - `catalog`: static per-collection metadata (staleness class, ordering)
//! - `common`: raw record type and the alias-resolving [`Fields`] reader
//! - `entities`: one canonical entity + normalizer per collection
//! - `validation`: write-boundary checks for drafts and patches

pub mod catalog;
pub mod common;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

pub use common::{Fields, RawRecord};
pub use entities::{
    Club, Coach, Competition, Contact, Entity, Event, Federation, Game, NewsItem, Normalized,
    Player, Referee, RegionalAssociation, Team, normalize_all,
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
pub use value_objects::{
    Collection, EntityId, GameStatus, LifecycleStatus, NewsStatus, ScheduleStatus, View,
    Volatility,
};

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRecord {
        serde_json::from_value(value).unwrap()
    }

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn collection_parses_aliases() {
        assert_eq!(Collection::from_str("teams").unwrap(), Collection::Teams);
        assert_eq!(
            Collection::from_str("regional-associations").unwrap(),
            Collection::RegionalAssociations
        );
        assert_eq!(Collection::from_str("JOGOS").unwrap(), Collection::Games);
        assert!(Collection::from_str("stadiums").is_err());
    }

    #[test]
    fn collection_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(
                Collection::from_str(collection.as_str()).unwrap(),
                collection
            );
        }
    }

    #[test]
    fn game_status_vocabulary_mapping() {
        assert_eq!("finalizado".parse::<GameStatus>().unwrap(), GameStatus::Finished);
        assert_eq!("em_andamento".parse::<GameStatus>().unwrap(), GameStatus::Live);
        assert_eq!("Ao Vivo".parse::<GameStatus>().unwrap(), GameStatus::Live);
        assert_eq!("adiado".parse::<GameStatus>().unwrap(), GameStatus::Postponed);
        assert_eq!("cancelado".parse::<GameStatus>().unwrap(), GameStatus::Cancelled);
        assert_eq!("agendado".parse::<GameStatus>().unwrap(), GameStatus::Scheduled);
        assert!("halftime".parse::<GameStatus>().is_err());
    }

    #[test]
    fn news_status_vocabulary_mapping() {
        assert_eq!("rascunho".parse::<NewsStatus>().unwrap(), NewsStatus::Draft);
        assert_eq!("pendente".parse::<NewsStatus>().unwrap(), NewsStatus::Pending);
        assert_eq!("publicado".parse::<NewsStatus>().unwrap(), NewsStatus::Published);
    }

    // ========================================================================
    // Normalization Properties
    // ========================================================================

    #[test]
    fn normalization_is_total_for_identity_only_records() {
        let only_id = raw(json!({ "id": "x1" }));

        assert!(Team::normalize(&only_id).is_ok());
        assert!(Club::normalize(&only_id).is_ok());
        assert!(Player::normalize(&only_id).is_ok());
        assert!(Game::normalize(&only_id).is_ok());
        assert!(Competition::normalize(&only_id).is_ok());
        assert!(NewsItem::normalize(&only_id).is_ok());
        assert!(Event::normalize(&only_id).is_ok());
        assert!(Referee::normalize(&only_id).is_ok());
        assert!(Federation::normalize(&only_id).is_ok());
        assert!(RegionalAssociation::normalize(&only_id).is_ok());
        assert!(Coach::normalize(&only_id).is_ok());
    }

    #[test]
    fn missing_identity_is_rejected_not_defaulted() {
        let no_id = raw(json!({ "name": "CD Travadores" }));
        assert_eq!(
            Team::normalize(&no_id).unwrap_err(),
            DomainError::MissingRequiredField { field: "id" }
        );
    }

    #[test]
    fn each_record_without_identity_shrinks_the_collection_by_one() {
        let records = vec![
            raw(json!({ "id": "1", "name": "A" })),
            raw(json!({ "name": "no id" })),
            raw(json!({ "id": "2", "name": "B" })),
            raw(json!({ "id": null, "name": "null id" })),
            raw(json!({ "id": "3", "name": "C" })),
        ];

        let normalized = normalize_all::<Team>(&records);
        assert_eq!(normalized.entities.len(), records.len() - 2);
        assert_eq!(normalized.rejected, 2);
        let names: Vec<_> = normalized.entities.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn duplicate_identity_keeps_first() {
        let records = vec![
            raw(json!({ "id": "1", "name": "first" })),
            raw(json!({ "id": 1, "name": "second" })),
        ];
        let normalized = normalize_all::<Team>(&records);
        assert_eq!(normalized.entities.len(), 1);
        assert_eq!(normalized.entities[0].name, "first");
        assert_eq!(normalized.rejected, 1);
    }

    // ========================================================================
    // Write-boundary Validation
    // ========================================================================

    #[test]
    fn draft_game_with_same_teams_is_rejected() {
        let draft = raw(json!({ "home_team_id": "t1", "away_team_id": "t1" }));
        let err = DomainValidator::validate_draft::<Game>(&draft).unwrap_err();
        assert!(matches!(err, DomainError::SameTeams { .. }));
    }

    #[test]
    fn patch_is_checked_against_cached_entity() {
        let current = Game::normalize(&raw(json!({
            "id": "g1", "home_team_id": "t1", "away_team_id": "t2"
        })))
        .unwrap();
        let id = EntityId::new("g1");

        let bad = raw(json!({ "away_team_id": "t1" }));
        assert!(DomainValidator::validate_patch(&id, Some(&current), &bad).is_err());

        let good = raw(json!({ "home_score": 78, "away_score": 65, "status": "finalizado" }));
        let preview = DomainValidator::validate_patch(&id, Some(&current), &good).unwrap();
        assert_eq!(preview.score(), Some((78, 65)));
    }

    #[test]
    fn patch_cannot_change_identity_or_be_empty() {
        let id = EntityId::new("t1");
        let other = raw(json!({ "id": "t2" }));
        assert!(DomainValidator::validate_patch::<Team>(&id, None, &other).is_err());
        assert!(DomainValidator::validate_patch::<Team>(&id, None, &RawRecord::new()).is_err());
    }
}

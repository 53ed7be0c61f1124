//! Collection catalog.
//!
//! Single static registry describing every collection once: its singular
//! label, staleness class and default ordering. Views are registered the
//! same way. All lookups are O(n) scans over small tables.
//!
//! # Adding a New Collection
//!
//! 1. Add a variant to `Collection` in `value_objects.rs`
//! 2. Add one [`CollectionDef`] entry to [`COLLECTION_REGISTRY`]
//! 3. Add the canonical entity under `entities/` and its fallback rows

use crate::domain::value_objects::{Collection, View, Volatility};

/// Describes the static properties of one collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionDef {
    pub collection: Collection,

    /// Singular label for outcome messages ("Team created").
    pub singular: &'static str,

    pub volatility: Volatility,

    /// Default ordering as `(column, ascending)`.
    pub order_by: Option<(&'static str, bool)>,
}

pub static COLLECTION_REGISTRY: &[CollectionDef] = &[
    CollectionDef {
        collection: Collection::Teams,
        singular: "Team",
        volatility: Volatility::Medium,
        order_by: Some(("name", true)),
    },
    CollectionDef {
        collection: Collection::Clubs,
        singular: "Club",
        volatility: Volatility::Medium,
        order_by: Some(("name", true)),
    },
    CollectionDef {
        collection: Collection::Players,
        singular: "Player",
        volatility: Volatility::Medium,
        order_by: Some(("last_name", true)),
    },
    CollectionDef {
        collection: Collection::Games,
        singular: "Game",
        volatility: Volatility::High,
        order_by: Some(("game_date", true)),
    },
    CollectionDef {
        collection: Collection::Competitions,
        singular: "Competition",
        volatility: Volatility::Medium,
        order_by: Some(("start_date", false)),
    },
    CollectionDef {
        collection: Collection::News,
        singular: "News item",
        volatility: Volatility::High,
        order_by: Some(("published_at", false)),
    },
    CollectionDef {
        collection: Collection::Events,
        singular: "Event",
        volatility: Volatility::Medium,
        order_by: Some(("start_date", true)),
    },
    CollectionDef {
        collection: Collection::Referees,
        singular: "Referee",
        volatility: Volatility::Medium,
        order_by: Some(("name", true)),
    },
    CollectionDef {
        collection: Collection::Federations,
        singular: "Federation",
        volatility: Volatility::Low,
        order_by: Some(("name", true)),
    },
    CollectionDef {
        collection: Collection::RegionalAssociations,
        singular: "Regional association",
        volatility: Volatility::Low,
        order_by: Some(("name", true)),
    },
    CollectionDef {
        collection: Collection::Coaches,
        singular: "Coach",
        volatility: Volatility::Medium,
        order_by: Some(("name", true)),
    },
];

/// Which collections each view reads on first use.
pub static VIEW_REGISTRY: &[(View, &[Collection])] = &[
    (
        View::Home,
        &[
            Collection::Games,
            Collection::News,
            Collection::Events,
            Collection::Teams,
        ],
    ),
    (
        View::Games,
        &[Collection::Games, Collection::Teams, Collection::Competitions],
    ),
    (
        View::Teams,
        &[Collection::Teams, Collection::Clubs, Collection::Players],
    ),
    (View::News, &[Collection::News]),
    (
        View::Organizations,
        &[
            Collection::Federations,
            Collection::RegionalAssociations,
            Collection::Clubs,
        ],
    ),
    (View::Admin, &Collection::ALL),
];

// ── Registry lookup API ───────────────────────────────────────────────────────

/// Find the definition for a collection.
///
/// Returns `None` only if the collection is not registered, a programming
/// error caught by `assert_registry_integrity`.
pub fn find_collection(collection: Collection) -> Option<&'static CollectionDef> {
    COLLECTION_REGISTRY
        .iter()
        .find(|def| def.collection == collection)
}

/// Collections needed by a view.
pub fn view_collections(view: View) -> &'static [Collection] {
    VIEW_REGISTRY
        .iter()
        .find(|(v, _)| *v == view)
        .map(|(_, collections)| *collections)
        .unwrap_or(&[])
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

#[doc(hidden)]
pub fn assert_registry_integrity() {
    for collection in Collection::ALL {
        let matches = COLLECTION_REGISTRY
            .iter()
            .filter(|def| def.collection == collection)
            .count();
        assert_eq!(
            matches, 1,
            "Collection {:?} must be registered exactly once (found {})",
            collection, matches
        );
    }

    for (view, collections) in VIEW_REGISTRY {
        assert!(!collections.is_empty(), "View {:?} loads nothing", view);
    }
}

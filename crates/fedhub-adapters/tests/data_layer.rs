//! End-to-end behavior of the data layer over the in-memory adapters.

use std::sync::Arc;
use std::time::Duration;

use fedhub_adapters::{BuiltinFallback, MemoryTableClient, RecordingNotifier};
use fedhub_core::application::ports::Severity;
use fedhub_core::prelude::*;
use serde_json::json;

fn raw(value: serde_json::Value) -> RawRecord {
    serde_json::from_value(value).unwrap()
}

fn facade(client: &MemoryTableClient, notifier: &RecordingNotifier) -> DataFacade {
    DataFacade::builder(Arc::new(client.clone()))
        .notifier(Arc::new(notifier.clone()))
        .fallback(Arc::new(BuiltinFallback))
        .build()
}

fn seeded_games() -> MemoryTableClient {
    MemoryTableClient::new()
        .with_rows(
            Collection::Teams,
            vec![
                raw(json!({ "id": "t1", "name": "CD Travadores" })),
                raw(json!({ "id": "t2", "name": "ABC Académica" })),
            ],
        )
        .with_rows(
            Collection::Games,
            vec![raw(json!({
                "id": "g1",
                "home_team_id": "t1",
                "away_team_id": "t2",
                "date": "2024-05-04",
                "status": "agendado"
            }))],
        )
}

fn drain(rx: &mut tokio::sync::broadcast::Receiver<CacheEvent>) -> Vec<CacheEventKind> {
    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind);
    }
    kinds
}

// ============================================================================
// Fallback
// ============================================================================

#[tokio::test]
async fn teams_fall_back_to_three_seeded_teams() {
    let client = MemoryTableClient::new();
    client.go_offline();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);

    let teams = facade.teams().ensure_loaded().await;

    assert_eq!(teams.status, CacheStatus::Ready);
    assert_eq!(teams.source, DataSource::Fallback);
    let names: Vec<_> = teams.data.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["CD Travadores", "ABC Académica", "Sporting Clube da Praia"]
    );
    assert!(teams.error.is_some());
    assert_eq!(notifier.count(), 0);
}

#[tokio::test]
async fn failed_refresh_never_clobbers_fetched_data() {
    let client = seeded_games();
    let facade = facade(&client, &RecordingNotifier::new());
    let loaded = facade.teams().ensure_loaded().await;

    client.go_offline();
    let after = facade.teams().refresh().await;

    assert_eq!(after.source, DataSource::Remote);
    assert_eq!(after.data, loaded.data);
    assert!(after.error.is_some());
}

// ============================================================================
// Normalization
// ============================================================================

#[tokio::test]
async fn each_record_without_identity_shrinks_the_collection_by_one() {
    let client = MemoryTableClient::new().with_rows(
        Collection::Players,
        vec![
            raw(json!({ "id": "p1", "name": "Walter Tavares" })),
            raw(json!({ "name": "Nameless" })),
            raw(json!({ "id": 17, "first_name": "Ivan", "last_name": "Almeida" })),
            raw(json!({ "jersey_number": "9" })),
        ],
    );
    let facade = facade(&client, &RecordingNotifier::new());

    let players = facade.players().ensure_loaded().await;

    assert_eq!(players.len(), 2);
    assert_eq!(players.data[1].id.as_str(), "17");
    assert_eq!(players.data[1].name, "Ivan Almeida");
}

// ============================================================================
// Mutations
// ============================================================================

#[tokio::test]
async fn create_passes_through_loading_and_lands_exactly_once() {
    let client = seeded_games();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);
    facade.teams().ensure_loaded().await;
    let mut rx = facade.teams().subscribe();

    let created = facade
        .teams()
        .create(raw(json!({ "name": "Sporting Clube da Praia", "ilha": "Santiago" })))
        .await
        .unwrap();

    let events = drain(&mut rx);
    assert_eq!(events[0], CacheEventKind::Invalidated);
    assert!(events.contains(&CacheEventKind::Loading));
    assert!(matches!(
        events.last(),
        Some(CacheEventKind::Loaded { count: 3, .. })
    ));

    let teams = facade.teams().snapshot();
    assert_eq!(teams.status, CacheStatus::Ready);
    assert_eq!(teams.data.iter().filter(|t| t.id == created.id).count(), 1);
    assert_eq!(notifier.count_of(Severity::Success), 1);
}

#[tokio::test]
async fn entity_without_id_gets_one_from_the_remote() {
    let client = seeded_games();
    let facade = facade(&client, &RecordingNotifier::new());
    let draft = Team::normalize_draft(&raw(json!({ "nome": "Académica do Mindelo" })));
    assert!(!draft.id.is_assigned());

    let created = facade.teams().create_entity(&draft).await.unwrap();

    assert!(created.id.is_assigned());
    assert_eq!(created.name, "Académica do Mindelo");
    assert_eq!(client.rows(Collection::Teams).len(), 3);
}

#[tokio::test]
async fn game_score_update_is_visible_after_refresh() {
    let client = seeded_games();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);
    facade.games().ensure_loaded().await;

    facade
        .games()
        .update(
            &EntityId::new("g1"),
            raw(json!({ "home_score": 78, "away_score": 65, "status": "finalizado" })),
        )
        .await
        .unwrap();

    let game = facade.games().get(&EntityId::new("g1")).unwrap();
    assert_eq!(game.status, GameStatus::Finished);
    assert_eq!(game.score(), Some((78, 65)));
    assert_eq!(game.winner(), Some(&EntityId::new("t1")));
    assert_eq!(notifier.count_of(Severity::Success), 1);
}

#[tokio::test]
async fn same_team_game_never_reaches_the_remote() {
    let client = seeded_games();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);

    let result = facade
        .games()
        .create(raw(json!({
            "home_team_id": "t1",
            "away_team_id": "t1",
            "game_date": "2024-06-01"
        })))
        .await;

    assert!(result.is_err());
    assert_eq!(client.rows(Collection::Games).len(), 1);
    assert_eq!(client.fetch_count(Collection::Games), 0);
    assert_eq!(notifier.count_of(Severity::Destructive), 1);
}

#[tokio::test]
async fn second_delete_is_not_found_and_leaves_cache_alone() {
    let client = seeded_games();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);
    facade.teams().ensure_loaded().await;

    facade.teams().delete(&EntityId::new("t2")).await.unwrap();
    let after_first = facade.teams().snapshot();
    let second = facade.teams().delete(&EntityId::new("t2")).await;

    assert_eq!(second.unwrap_err().category(), fedhub_core::error::ErrorCategory::NotFound);
    assert_eq!(facade.teams().snapshot().data, after_first.data);
    assert_eq!(after_first.len(), 1);
    assert_eq!(notifier.count(), 2);
    assert_eq!(notifier.last().map(|o| o.severity), Some(Severity::Destructive));
}

#[tokio::test]
async fn write_failure_keeps_cache_and_reports_remote_message() {
    let client = seeded_games();
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);
    let before = facade.teams().ensure_loaded().await;

    client.fail_next(RemoteError::unauthorized("new row violates row-level security policy"));
    let result = facade.teams().create(raw(json!({ "name": "Derby" }))).await;

    assert!(result.is_err());
    assert_eq!(facade.teams().snapshot().data, before.data);
    assert_eq!(
        notifier.last().map(|o| o.description),
        Some("new row violates row-level security policy".to_string())
    );
}

#[tokio::test]
async fn create_with_taken_id_fails_and_keeps_the_stored_row() {
    let client = MemoryTableClient::new()
        .with_rows(Collection::Teams, vec![raw(json!({ "id": "t1", "name": "Old" }))]);
    let notifier = RecordingNotifier::new();
    let facade = facade(&client, &notifier);
    facade.teams().ensure_loaded().await;

    let result = facade
        .teams()
        .create(raw(json!({ "id": "t1", "name": "New" })))
        .await;

    assert!(result.is_err());
    assert_eq!(client.rows(Collection::Teams).len(), 1);
    let names: Vec<_> = facade
        .teams()
        .snapshot()
        .data
        .iter()
        .map(|t| t.name.clone())
        .collect();
    assert_eq!(names, vec!["Old".to_string()]);
    assert_eq!(notifier.count_of(Severity::Destructive), 1);
}

// ============================================================================
// Concurrency and staleness
// ============================================================================

#[tokio::test(start_paused = true)]
async fn concurrent_loads_issue_one_fetch() {
    let client = seeded_games().with_latency(Duration::from_millis(200));
    let facade = facade(&client, &RecordingNotifier::new());

    let (a, b) = tokio::join!(
        facade.teams().refresh(),
        facade.load(&[Collection::Teams, Collection::Games])
    );

    assert_eq!(client.fetch_count(Collection::Teams), 1);
    assert_eq!(client.fetch_count(Collection::Games), 1);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_read_serves_old_data_then_refreshes() {
    let client = seeded_games();
    let facade = facade(&client, &RecordingNotifier::new());
    facade.games().ensure_loaded().await;

    tokio::time::advance(StalenessPolicy::DEFAULT_SHORT + Duration::from_secs(1)).await;
    let mut rx = facade.games().subscribe();
    let stale = facade.games().read();

    assert_eq!(stale.freshness, Freshness::Stale);
    assert_eq!(stale.len(), 1);
    loop {
        if matches!(rx.recv().await.unwrap().kind, CacheEventKind::Loaded { .. }) {
            break;
        }
    }
    assert_eq!(client.fetch_count(Collection::Games), 2);
    assert_eq!(facade.games().read().freshness, Freshness::Fresh);
}

#[tokio::test(start_paused = true)]
async fn fallback_data_is_always_stale() {
    let client = MemoryTableClient::new();
    client.go_offline();
    let facade = facade(&client, &RecordingNotifier::new());

    let teams = facade.teams().ensure_loaded().await;

    assert_eq!(teams.freshness, Freshness::Stale);
}

#[tokio::test]
async fn home_view_leaves_other_collections_untouched() {
    let client = seeded_games();
    let facade = facade(&client, &RecordingNotifier::new());

    facade.load_view(View::Home).await;

    for collection in Collection::ALL {
        let expected = usize::from(View::Home.collections().contains(&collection));
        assert_eq!(client.fetch_count(collection), expected, "{collection}");
    }
    assert!(!facade.is_loading(View::Home.collections()));
}

//! Built-in placeholder datasets.
//!
//! Shown when the first fetch of a collection fails, so public pages are
//! never blank. Rows are raw records and go through the same normalizers as
//! fetched rows.

use serde_json::{Value, json};

use fedhub_core::{application::ports::FallbackProvider, domain::Collection, domain::RawRecord};

/// Static datasets shipped with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFallback;

impl BuiltinFallback {
    pub fn new() -> Self {
        Self
    }
}

impl FallbackProvider for BuiltinFallback {
    fn records(&self, collection: Collection) -> Vec<RawRecord> {
        let rows = match collection {
            Collection::Teams => teams(),
            Collection::Clubs => clubs(),
            Collection::Players => players(),
            Collection::Games => games(),
            Collection::Competitions => competitions(),
            Collection::News => news(),
            Collection::Events => events(),
            Collection::Referees => referees(),
            Collection::Federations => federations(),
            Collection::RegionalAssociations => regional_associations(),
            Collection::Coaches => coaches(),
        };
        rows.into_iter().filter_map(into_record).collect()
    }
}

fn into_record(value: Value) -> Option<RawRecord> {
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn teams() -> Vec<Value> {
    vec![
        json!({
            "id": "fallback-team-1",
            "name": "CD Travadores",
            "abbreviation": "CDT",
            "city": "Praia",
            "island": "Santiago",
            "founded_year": 1930,
            "status": "active"
        }),
        json!({
            "id": "fallback-team-2",
            "name": "ABC Académica",
            "abbreviation": "ABC",
            "city": "Praia",
            "island": "Santiago",
            "founded_year": 1962,
            "status": "active"
        }),
        json!({
            "id": "fallback-team-3",
            "name": "Sporting Clube da Praia",
            "abbreviation": "SCP",
            "city": "Praia",
            "island": "Santiago",
            "founded_year": 1923,
            "status": "active"
        }),
    ]
}

fn clubs() -> Vec<Value> {
    vec![
        json!({
            "id": "fallback-club-1",
            "name": "Clube Desportivo Travadores",
            "abbreviation": "CDT",
            "island": "Santiago",
            "city": "Praia",
            "founded_year": 1930,
            "regional_association_id": "fallback-association-1"
        }),
        json!({
            "id": "fallback-club-2",
            "name": "Académica do Mindelo",
            "abbreviation": "AM",
            "island": "São Vicente",
            "city": "Mindelo",
            "founded_year": 1940,
            "regional_association_id": "fallback-association-2"
        }),
    ]
}

fn players() -> Vec<Value> {
    vec![
        json!({
            "id": "fallback-player-1",
            "first_name": "Walter",
            "last_name": "Tavares",
            "position": "Poste",
            "jersey_number": 22,
            "height_cm": 220,
            "team_id": "fallback-team-1",
            "nationality": "Cabo Verde"
        }),
        json!({
            "id": "fallback-player-2",
            "first_name": "Ivan",
            "last_name": "Almeida",
            "position": "Extremo",
            "jersey_number": 7,
            "height_cm": 201,
            "team_id": "fallback-team-2",
            "nationality": "Cabo Verde"
        }),
    ]
}

fn games() -> Vec<Value> {
    vec![
        json!({
            "id": "fallback-game-1",
            "home_team_id": "fallback-team-1",
            "away_team_id": "fallback-team-2",
            "competition_id": "fallback-competition-1",
            "game_date": "2024-03-16",
            "game_time": "18:00",
            "venue": "Pavilhão Vavá Duarte",
            "status": "scheduled",
            "round": "Jornada 1"
        }),
        json!({
            "id": "fallback-game-2",
            "home_team_id": "fallback-team-3",
            "away_team_id": "fallback-team-1",
            "competition_id": "fallback-competition-1",
            "game_date": "2024-03-09",
            "game_time": "20:00",
            "venue": "Pavilhão Vavá Duarte",
            "home_score": 71,
            "away_score": 68,
            "status": "finished",
            "round": "Jornada 0"
        }),
    ]
}

fn competitions() -> Vec<Value> {
    vec![json!({
        "id": "fallback-competition-1",
        "name": "Campeonato Nacional de Basquetebol",
        "type": "league",
        "season": "2023/2024",
        "start_date": "2024-03-01",
        "end_date": "2024-06-30",
        "status": "ongoing"
    })]
}

fn news() -> Vec<Value> {
    vec![json!({
        "id": "fallback-news-1",
        "title": "Campeonato Nacional arranca em março",
        "summary": "A nova época começa com seis equipas em competição.",
        "body": "A Federação anuncia o calendário do Campeonato Nacional.",
        "category": "Competições",
        "author": "Federação",
        "published_at": "2024-02-20T09:00:00Z",
        "tags": ["campeonato", "calendario"],
        "featured": true,
        "status": "published"
    })]
}

fn events() -> Vec<Value> {
    vec![json!({
        "id": "fallback-event-1",
        "title": "Clínica de Treinadores",
        "description": "Formação para treinadores de nível I.",
        "start_date": "2024-04-12",
        "end_date": "2024-04-14",
        "location": "Praia",
        "type": "training",
        "status": "upcoming"
    })]
}

fn referees() -> Vec<Value> {
    vec![json!({
        "id": "fallback-referee-1",
        "name": "Carlos Monteiro",
        "license_number": "ARB-0001",
        "category": "Nacional",
        "island": "Santiago",
        "status": "active"
    })]
}

fn federations() -> Vec<Value> {
    vec![json!({
        "id": "fallback-federation-1",
        "name": "Federação Cabo-verdiana de Basquetebol",
        "abbreviation": "FCBB",
        "founded_year": 1986,
        "email": "geral@fcbb.cv",
        "address": "Praia, Cabo Verde"
    })]
}

fn regional_associations() -> Vec<Value> {
    vec![
        json!({
            "id": "fallback-association-1",
            "name": "Associação Regional de Basquetebol de Santiago Sul",
            "abbreviation": "ARBSS",
            "island": "Santiago",
            "status": "active"
        }),
        json!({
            "id": "fallback-association-2",
            "name": "Associação Regional de Basquetebol de São Vicente",
            "abbreviation": "ARBSV",
            "island": "São Vicente",
            "status": "active"
        }),
    ]
}

fn coaches() -> Vec<Value> {
    vec![json!({
        "id": "fallback-coach-1",
        "name": "Emanuel Trovoada",
        "license_level": "Nível III",
        "team_id": "fallback-team-1",
        "nationality": "Cabo Verde",
        "status": "active"
    })]
}

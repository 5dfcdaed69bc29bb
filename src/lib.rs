//! Tournament match generator: library with models, match builders and an in-memory store.

pub mod config;
pub mod logic;
pub mod models;
pub mod roster;
pub mod store;

pub use config::{ConfigError, ServerConfig};
pub use logic::{
    bracket_capacity, generate_matches, round_robin_matches, single_elimination_matches,
    sorted_by_seed, MAX_BRACKET_TEAMS,
};
pub use models::{
    MatchId, MatchRecord, Schedule, StoredMatch, Team, TeamId, Tournament, TournamentId,
    TournamentTeam, TournamentType,
};
pub use roster::{parse_roster, RosterEntry, RosterError};
pub use store::{MatchStore, StoreError};

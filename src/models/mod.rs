//! Data structures: tournament descriptor, teams, generated matches.

mod game;
mod team;
mod tournament;

pub use game::{MatchId, MatchRecord, Schedule, StoredMatch};
pub use team::{Team, TeamId, TournamentTeam};
pub use tournament::{Tournament, TournamentId, TournamentType};

//! Entry point: pick a builder by tournament format.

use crate::logic::round_robin::round_robin_matches;
use crate::logic::single_elimination::single_elimination_matches;
use crate::models::{Schedule, Tournament, TournamentTeam, TournamentType};

/// Generate the matches for a tournament.
///
/// Formats without a builder return no matches and echo `tournament.max_teams` as capacity.
pub fn generate_matches(tournament: &Tournament, teams: &[TournamentTeam]) -> Schedule {
    match &tournament.tournament_type {
        TournamentType::RoundRobin => round_robin_matches(tournament, teams),
        TournamentType::SingleElimination => single_elimination_matches(tournament, teams),
        TournamentType::Other(tag) => {
            log::debug!(
                "No match builder for format '{}' (tournament {}), returning empty schedule",
                tag,
                tournament.id
            );
            Schedule {
                matches: Vec::new(),
                capacity: tournament.max_teams,
            }
        }
    }
}

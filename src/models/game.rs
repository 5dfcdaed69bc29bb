//! Match records produced by the generator, and their stored form.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage identity of a generated match.
pub type MatchId = Uuid;

/// One generated match. A `None` team slot is a bye or a not-yet-determined team.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub date: DateTime<Utc>,
    /// Position within its column, zero-based.
    pub row: u32,
    /// Round index, zero-based (0 = first round).
    pub column: u32,
}

impl MatchRecord {
    pub fn new(
        team1_id: Option<TeamId>,
        team2_id: Option<TeamId>,
        date: DateTime<Utc>,
        row: u32,
        column: u32,
    ) -> Self {
        Self {
            team1_id,
            team2_id,
            date,
            row,
            column,
        }
    }

    /// Placeholder with both slots empty, to be filled by a later round.
    pub fn placeholder(date: DateTime<Utc>, row: u32, column: u32) -> Self {
        Self::new(None, None, date, row, column)
    }

    /// True if either slot holds a team.
    pub fn has_teams(&self) -> bool {
        self.team1_id.is_some() || self.team2_id.is_some()
    }
}

/// Output of the generator: ordered matches plus the capacity the format is sized for.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub matches: Vec<MatchRecord>,
    pub capacity: u32,
}

impl Schedule {
    /// Matches belonging to one column (round), in row order.
    pub fn column(&self, column: u32) -> impl Iterator<Item = &MatchRecord> {
        self.matches.iter().filter(move |m| m.column == column)
    }
}

/// A match after the store has given it an identity.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoredMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub record: MatchRecord,
}

impl StoredMatch {
    pub fn new(tournament_id: TournamentId, record: MatchRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            record,
        }
    }
}

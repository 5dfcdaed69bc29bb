//! Team and the seeded TournamentTeam entry.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team.
pub type TeamId = Uuid;

/// A team that can be entered into tournaments.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

impl Team {
    /// Create a new team with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A team entered into a tournament, with its seed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentTeam {
    pub team: Team,
    /// Seed / position number. Lower numbers come first in pairings.
    pub team_number: i32,
}

impl TournamentTeam {
    pub fn new(team: Team, team_number: i32) -> Self {
        Self { team, team_number }
    }

    pub fn id(&self) -> TeamId {
        self.team.id
    }
}

//! Tournament descriptor and its format tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Format of a tournament. Unknown tags are kept as `Other` rather than rejected.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TournamentType {
    RoundRobin,
    SingleElimination,
    Other(String),
}

impl TournamentType {
    pub fn as_str(&self) -> &str {
        match self {
            TournamentType::RoundRobin => "round_robin",
            TournamentType::SingleElimination => "single_elimination",
            TournamentType::Other(tag) => tag,
        }
    }
}

impl From<String> for TournamentType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "round_robin" => TournamentType::RoundRobin,
            "single_elimination" => TournamentType::SingleElimination,
            _ => TournamentType::Other(tag),
        }
    }
}

impl From<&str> for TournamentType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<TournamentType> for String {
    fn from(t: TournamentType) -> Self {
        match t {
            TournamentType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TournamentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the generator needs to know about a competition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    #[serde(rename = "type")]
    pub tournament_type: TournamentType,
    /// Capacity configured by the organizer.
    pub max_teams: u32,
    /// Default date for every generated match.
    pub start_date: DateTime<Utc>,
}

impl Tournament {
    pub fn new(
        name: impl Into<String>,
        tournament_type: TournamentType,
        max_teams: u32,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tournament_type,
            max_teams,
            start_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_parse_to_variants() {
        assert_eq!(TournamentType::from("round_robin"), TournamentType::RoundRobin);
        assert_eq!(
            TournamentType::from("single_elimination"),
            TournamentType::SingleElimination
        );
    }

    #[test]
    fn unknown_tag_is_kept() {
        let t: TournamentType = serde_json::from_str("\"league\"").unwrap();
        assert_eq!(t, TournamentType::Other("league".to_string()));
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"league\"");
    }

    #[test]
    fn descriptor_serializes_type_field() {
        let t = Tournament::new("Spring Cup", TournamentType::RoundRobin, 8, Utc::now());
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["type"], "round_robin");
        assert_eq!(v["max_teams"], 8);
    }
}

//! In-memory persistence for tournaments, their teams and generated matches.

use crate::logic::generate_matches;
use crate::roster::RosterEntry;
use crate::models::{
    MatchId, StoredMatch, Team, TeamId, Tournament, TournamentId, TournamentTeam, TournamentType,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Errors that can occur during store operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StoreError {
    TournamentNotFound(TournamentId),
    TeamNotFound(TeamId),
    MatchNotFound(MatchId),
    /// A team with this name is already entered (case-insensitive).
    DuplicateTeamName,
    EmptyTeamName,
    /// The tournament already has `max_teams` teams.
    TournamentFull { max_teams: u32 },
    /// The team is not entered in this tournament.
    TeamNotEnrolled(TeamId),
    /// No seed is left after the current highest (`i32::MAX` is taken).
    SeedOverflow,
}

impl StoreError {
    /// True for the "does not exist" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::TournamentNotFound(_) | StoreError::TeamNotFound(_) | StoreError::MatchNotFound(_)
        )
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::TournamentNotFound(_) => write!(f, "Tournament not found"),
            StoreError::TeamNotFound(_) => write!(f, "Team not found"),
            StoreError::MatchNotFound(_) => write!(f, "Match not found"),
            StoreError::DuplicateTeamName => write!(f, "A team with this name is already entered"),
            StoreError::EmptyTeamName => write!(f, "Team name must not be empty"),
            StoreError::TournamentFull { max_teams } => {
                write!(f, "Tournament is full ({} teams max)", max_teams)
            }
            StoreError::TeamNotEnrolled(_) => write!(f, "Team is not entered in this tournament"),
            StoreError::SeedOverflow => {
                write!(f, "No team number left after the highest seed; give one explicitly")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Everything stored for one tournament.
#[derive(Clone, Debug)]
struct TournamentEntry {
    tournament: Tournament,
    /// Enrollment order.
    teams: Vec<TournamentTeam>,
    matches: Vec<StoredMatch>,
    /// Capacity reported by the last generation, if any.
    capacity: Option<u32>,
}

/// Tournaments by id. Not synchronized; the caller wraps it in a lock.
#[derive(Debug, Default)]
pub struct MatchStore {
    tournaments: HashMap<TournamentId, TournamentEntry>,
}

impl MatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_tournament(
        &mut self,
        name: impl Into<String>,
        tournament_type: TournamentType,
        max_teams: u32,
        start_date: DateTime<Utc>,
    ) -> &Tournament {
        let tournament = Tournament::new(name, tournament_type, max_teams, start_date);
        let id = tournament.id;
        log::info!("Created {} tournament {}", tournament.tournament_type, id);
        let entry = self.tournaments.entry(id).or_insert(TournamentEntry {
            tournament,
            teams: Vec::new(),
            matches: Vec::new(),
            capacity: None,
        });
        &entry.tournament
    }

    pub fn tournament(&self, id: TournamentId) -> Result<&Tournament, StoreError> {
        self.entry(id).map(|e| &e.tournament)
    }

    /// All tournaments, ordered by start date.
    pub fn tournaments(&self) -> Vec<&Tournament> {
        let mut all: Vec<_> = self.tournaments.values().map(|e| &e.tournament).collect();
        all.sort_by_key(|t| (t.start_date, t.id));
        all
    }

    /// Remove a tournament along with its teams and matches.
    pub fn delete_tournament(&mut self, id: TournamentId) -> Result<Tournament, StoreError> {
        self.tournaments
            .remove(&id)
            .map(|e| e.tournament)
            .ok_or(StoreError::TournamentNotFound(id))
    }

    /// Enter a new team. Without a number it is seeded after the current highest.
    pub fn add_team(
        &mut self,
        tournament_id: TournamentId,
        name: &str,
        team_number: Option<i32>,
    ) -> Result<&TournamentTeam, StoreError> {
        let entry = self.entry_mut(tournament_id)?;
        enroll(entry, name, team_number)?;
        Ok(&entry.teams[entry.teams.len() - 1])
    }

    /// Enter every roster row, or none of them if any row is rejected.
    pub fn import_roster(
        &mut self,
        tournament_id: TournamentId,
        roster: &[RosterEntry],
    ) -> Result<&[TournamentTeam], StoreError> {
        let entry = self.entry_mut(tournament_id)?;
        let before = entry.teams.len();
        for row in roster {
            if let Err(e) = enroll(entry, &row.name, Some(row.team_number)) {
                entry.teams.truncate(before);
                return Err(e);
            }
        }
        log::info!(
            "Imported {} teams into tournament {}",
            roster.len(),
            tournament_id
        );
        Ok(&entry.teams[before..])
    }

    /// Withdraw a team. Generated matches are dropped since they no longer fit the roster.
    pub fn remove_team(
        &mut self,
        tournament_id: TournamentId,
        team_id: TeamId,
    ) -> Result<TournamentTeam, StoreError> {
        let entry = self.entry_mut(tournament_id)?;
        let idx = entry
            .teams
            .iter()
            .position(|t| t.id() == team_id)
            .ok_or(StoreError::TeamNotFound(team_id))?;
        if !entry.matches.is_empty() {
            log::info!(
                "Dropping {} generated matches of tournament {} after team {} withdrew",
                entry.matches.len(),
                tournament_id,
                team_id
            );
            entry.matches.clear();
            entry.capacity = None;
        }
        Ok(entry.teams.remove(idx))
    }

    /// Entered teams in enrollment order.
    pub fn teams(&self, tournament_id: TournamentId) -> Result<&[TournamentTeam], StoreError> {
        self.entry(tournament_id).map(|e| e.teams.as_slice())
    }

    /// Generate matches for the entered teams, replacing any stored ones.
    pub fn generate_bracket(
        &mut self,
        tournament_id: TournamentId,
    ) -> Result<&[StoredMatch], StoreError> {
        let entry = self.entry_mut(tournament_id)?;
        let schedule = generate_matches(&entry.tournament, &entry.teams);
        log::info!(
            "Generated {} matches (capacity {}) for tournament {}",
            schedule.matches.len(),
            schedule.capacity,
            tournament_id
        );
        entry.matches = schedule
            .matches
            .into_iter()
            .map(|record| StoredMatch::new(tournament_id, record))
            .collect();
        entry.capacity = Some(schedule.capacity);
        Ok(&entry.matches)
    }

    pub fn matches(&self, tournament_id: TournamentId) -> Result<&[StoredMatch], StoreError> {
        self.entry(tournament_id).map(|e| e.matches.as_slice())
    }

    /// Capacity from the last generation; `None` until matches have been generated.
    pub fn capacity(&self, tournament_id: TournamentId) -> Result<Option<u32>, StoreError> {
        self.entry(tournament_id).map(|e| e.capacity)
    }

    /// Fill (or clear) the team slots of a stored match, e.g. once a previous round is decided.
    pub fn assign_match_teams(
        &mut self,
        tournament_id: TournamentId,
        match_id: MatchId,
        team1_id: Option<TeamId>,
        team2_id: Option<TeamId>,
    ) -> Result<&StoredMatch, StoreError> {
        let entry = self.entry_mut(tournament_id)?;
        for id in [team1_id, team2_id].into_iter().flatten() {
            if !entry.teams.iter().any(|t| t.id() == id) {
                return Err(StoreError::TeamNotEnrolled(id));
            }
        }
        let stored = entry
            .matches
            .iter_mut()
            .find(|m| m.id == match_id)
            .ok_or(StoreError::MatchNotFound(match_id))?;
        stored.record.team1_id = team1_id;
        stored.record.team2_id = team2_id;
        Ok(stored)
    }

    fn entry(&self, id: TournamentId) -> Result<&TournamentEntry, StoreError> {
        self.tournaments
            .get(&id)
            .ok_or(StoreError::TournamentNotFound(id))
    }

    fn entry_mut(&mut self, id: TournamentId) -> Result<&mut TournamentEntry, StoreError> {
        self.tournaments
            .get_mut(&id)
            .ok_or(StoreError::TournamentNotFound(id))
    }
}

fn enroll(
    entry: &mut TournamentEntry,
    name: &str,
    team_number: Option<i32>,
) -> Result<(), StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StoreError::EmptyTeamName);
    }
    let max_teams = entry.tournament.max_teams;
    if entry.teams.len() >= max_teams as usize {
        return Err(StoreError::TournamentFull { max_teams });
    }
    if entry
        .teams
        .iter()
        .any(|t| t.team.name.eq_ignore_ascii_case(name))
    {
        return Err(StoreError::DuplicateTeamName);
    }
    let team_number = match team_number {
        Some(n) => n,
        None => entry
            .teams
            .iter()
            .map(|t| t.team_number)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::SeedOverflow)?,
    };
    entry
        .teams
        .push(TournamentTeam::new(Team::new(name), team_number));
    Ok(())
}

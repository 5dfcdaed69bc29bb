//! Single elimination: a seeded knockout bracket skeleton.

use crate::logic::seeding::sorted_by_seed;
use crate::models::{MatchRecord, Schedule, Tournament, TournamentTeam};

/// Largest field a bracket can hold: the biggest power of two a `u32` capacity can express.
pub const MAX_BRACKET_TEAMS: usize = 1 << 31;

/// Smallest power of two that fits `team_count` (never below 2), and the number of rounds it takes.
///
/// # Panics
///
/// If `team_count` exceeds [`MAX_BRACKET_TEAMS`].
pub fn bracket_capacity(team_count: usize) -> (u32, u32) {
    assert!(
        team_count <= MAX_BRACKET_TEAMS,
        "{} teams exceed the largest bracket ({})",
        team_count,
        MAX_BRACKET_TEAMS
    );
    let mut capacity: u32 = 2;
    let mut rounds: u32 = 1;
    while (capacity as usize) < team_count {
        capacity *= 2;
        rounds += 1;
    }
    (capacity, rounds)
}

/// Generate every match of the bracket.
///
/// Column 0 holds `capacity / 2` matches and pairs sorted entries positionally:
/// row `i` gets `teams[2i]` vs `teams[2i + 1]`, with missing entries left empty (byes).
/// Each later column has half as many matches as the one before and starts with both
/// slots empty; they are filled once earlier results are known.
pub fn single_elimination_matches(tournament: &Tournament, teams: &[TournamentTeam]) -> Schedule {
    let teams = sorted_by_seed(teams);
    let (capacity, rounds) = bracket_capacity(teams.len());
    let mut matches = Vec::with_capacity(capacity as usize - 1);

    let mut per_column = capacity / 2;
    let mut column = 0;
    while per_column >= 1 {
        for row in 0..per_column {
            let record = if column == 0 {
                let slot = row as usize * 2;
                MatchRecord::new(
                    teams.get(slot).map(|t| t.id()),
                    teams.get(slot + 1).map(|t| t.id()),
                    tournament.start_date,
                    row,
                    column,
                )
            } else {
                MatchRecord::placeholder(tournament.start_date, row, column)
            };
            matches.push(record);
        }
        column += 1;
        per_column /= 2;
    }
    debug_assert_eq!(column, rounds);

    Schedule { matches, capacity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Team, TournamentType};
    use chrono::Utc;

    fn entries(n: i32) -> Vec<TournamentTeam> {
        (1..=n)
            .map(|i| TournamentTeam::new(Team::new(format!("T{i}")), i))
            .collect()
    }

    fn tournament() -> Tournament {
        Tournament::new("KO", TournamentType::SingleElimination, 16, Utc::now())
    }

    #[test]
    fn capacity_is_next_power_of_two() {
        assert_eq!(bracket_capacity(0), (2, 1));
        assert_eq!(bracket_capacity(1), (2, 1));
        assert_eq!(bracket_capacity(2), (2, 1));
        assert_eq!(bracket_capacity(3), (4, 2));
        assert_eq!(bracket_capacity(5), (8, 3));
        assert_eq!(bracket_capacity(16), (16, 4));
        assert_eq!(bracket_capacity(17), (32, 5));
        assert_eq!(bracket_capacity(MAX_BRACKET_TEAMS), (1 << 31, 31));
    }

    #[test]
    #[should_panic(expected = "exceed the largest bracket")]
    fn capacity_beyond_u32_is_rejected() {
        bracket_capacity(MAX_BRACKET_TEAMS + 1);
    }

    #[test]
    fn four_teams_fill_first_round() {
        let teams = entries(4);
        let s = single_elimination_matches(&tournament(), &teams);

        assert_eq!(s.capacity, 4);
        assert_eq!(s.matches.len(), 3);
        let first: Vec<_> = s.column(0).collect();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].team1_id, Some(teams[0].id()));
        assert_eq!(first[0].team2_id, Some(teams[1].id()));
        assert_eq!(first[1].team1_id, Some(teams[2].id()));
        assert_eq!(first[1].team2_id, Some(teams[3].id()));

        let final_round: Vec<_> = s.column(1).collect();
        assert_eq!(final_round.len(), 1);
        assert!(!final_round[0].has_teams());
    }

    #[test]
    fn five_teams_leave_byes() {
        let teams = entries(5);
        let s = single_elimination_matches(&tournament(), &teams);

        assert_eq!(s.capacity, 8);
        assert_eq!(s.matches.len(), 7);
        assert_eq!(s.column(0).count(), 4);
        assert_eq!(s.column(1).count(), 2);
        assert_eq!(s.column(2).count(), 1);

        let bye = s.column(0).find(|m| m.row == 2).unwrap();
        assert_eq!(bye.team1_id, Some(teams[4].id()));
        assert_eq!(bye.team2_id, None);
        let empty = s.column(0).find(|m| m.row == 3).unwrap();
        assert!(!empty.has_teams());
        assert!(s.matches.iter().filter(|m| m.column > 0).all(|m| !m.has_teams()));
    }

    #[test]
    fn no_teams_gives_one_empty_match() {
        let s = single_elimination_matches(&tournament(), &[]);
        assert_eq!(s.capacity, 2);
        assert_eq!(s.matches.len(), 1);
        assert_eq!((s.matches[0].row, s.matches[0].column), (0, 0));
        assert!(!s.matches[0].has_teams());
    }
}

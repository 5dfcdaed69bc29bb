//! Round robin: every team plays every other team once.

use crate::logic::seeding::sorted_by_seed;
use crate::models::{MatchRecord, Schedule, Tournament, TournamentTeam};

/// Generate one match per unordered pair of teams.
///
/// 1. Sort entries by seed.
/// 2. For each pair of sorted positions `i < j`, emit `teams[i]` vs `teams[j]` at row `i`, column `j`.
///
/// Capacity is the team count. Every match is dated at the tournament start.
pub fn round_robin_matches(tournament: &Tournament, teams: &[TournamentTeam]) -> Schedule {
    let teams = sorted_by_seed(teams);
    let n = teams.len();
    let mut matches = Vec::with_capacity(n * n.saturating_sub(1) / 2);

    for (i, home) in teams.iter().enumerate() {
        for (j, away) in teams.iter().enumerate().skip(i + 1) {
            matches.push(MatchRecord::new(
                Some(home.id()),
                Some(away.id()),
                tournament.start_date,
                i as u32,
                j as u32,
            ));
        }
    }

    Schedule {
        matches,
        capacity: n as u32,
    }
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

    #[test]
    fn three_teams_make_three_matches() {
        let t = Tournament::new("RR", TournamentType::RoundRobin, 3, Utc::now());
        let teams = entries(3);
        let s = round_robin_matches(&t, &teams);

        assert_eq!(s.capacity, 3);
        let got: Vec<_> = s
            .matches
            .iter()
            .map(|m| (m.team1_id, m.team2_id, m.row, m.column))
            .collect();
        assert_eq!(
            got,
            vec![
                (Some(teams[0].id()), Some(teams[1].id()), 0, 1),
                (Some(teams[0].id()), Some(teams[2].id()), 0, 2),
                (Some(teams[1].id()), Some(teams[2].id()), 1, 2),
            ]
        );
        assert!(s.matches.iter().all(|m| m.date == t.start_date));
    }

    #[test]
    fn single_team_has_no_matches() {
        let t = Tournament::new("RR", TournamentType::RoundRobin, 4, Utc::now());
        let s = round_robin_matches(&t, &entries(1));
        assert!(s.matches.is_empty());
        assert_eq!(s.capacity, 1);
    }
}

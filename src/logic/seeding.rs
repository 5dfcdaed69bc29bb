//! Seed ordering shared by the builders.

use crate::models::TournamentTeam;

/// Entries ordered ascending by `team_number`. Equal numbers keep their input order.
///
/// Returns a new ordering; the caller's slice is left untouched.
pub fn sorted_by_seed(teams: &[TournamentTeam]) -> Vec<&TournamentTeam> {
    let mut sorted: Vec<&TournamentTeam> = teams.iter().collect();
    sorted.sort_by_key(|t| t.team_number);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Team;

    #[test]
    fn sorts_by_number_and_keeps_input() {
        let teams = vec![
            TournamentTeam::new(Team::new("C"), 3),
            TournamentTeam::new(Team::new("A"), 1),
            TournamentTeam::new(Team::new("B"), 2),
        ];
        let sorted: Vec<_> = sorted_by_seed(&teams)
            .iter()
            .map(|t| t.team.name.as_str())
            .collect();
        assert_eq!(sorted, ["A", "B", "C"]);
        assert_eq!(teams[0].team.name, "C");
    }

    #[test]
    fn equal_seeds_keep_input_order() {
        let teams = vec![
            TournamentTeam::new(Team::new("first"), 1),
            TournamentTeam::new(Team::new("zero"), 0),
            TournamentTeam::new(Team::new("second"), 1),
        ];
        let sorted: Vec<_> = sorted_by_seed(&teams)
            .iter()
            .map(|t| t.team.name.as_str())
            .collect();
        assert_eq!(sorted, ["zero", "first", "second"]);
    }
}

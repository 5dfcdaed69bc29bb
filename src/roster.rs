//! CSV roster import: `name,team_number` rows into seeded entries.

use serde::Deserialize;
use std::io::Read;

/// One parsed roster row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    pub name: String,
    pub team_number: i32,
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    #[serde(default)]
    team_number: Option<String>,
}

/// Errors that can occur while reading a roster.
#[derive(Debug)]
pub enum RosterError {
    Csv(csv::Error),
    /// A row has a blank name.
    EmptyName { line: u64 },
    /// `team_number` is present but not an integer.
    InvalidTeamNumber { line: u64, value: String },
    /// A row without `team_number` follows a row seeded `i32::MAX`.
    SeedOverflow { line: u64 },
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::Csv(e) => write!(f, "Invalid CSV: {}", e),
            RosterError::EmptyName { line } => write!(f, "Line {}: team name is empty", line),
            RosterError::InvalidTeamNumber { line, value } => {
                write!(f, "Line {}: '{}' is not a valid team number", line, value)
            }
            RosterError::SeedOverflow { line } => {
                write!(f, "Line {}: no team number left after the highest seed", line)
            }
        }
    }
}

impl std::error::Error for RosterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for RosterError {
    fn from(e: csv::Error) -> Self {
        RosterError::Csv(e)
    }
}

/// Parse a roster with a `name,team_number` header.
///
/// A blank `team_number` (or a missing column) gets the next number after the highest seen so far.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut entries = Vec::new();
    let mut highest: i32 = 0;
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let row: RosterRow = record.deserialize(Some(&headers))?;

        if row.name.is_empty() {
            return Err(RosterError::EmptyName { line });
        }
        let team_number = match row.team_number.as_deref() {
            None | Some("") => highest
                .checked_add(1)
                .ok_or(RosterError::SeedOverflow { line })?,
            Some(value) => value.parse().map_err(|_| RosterError::InvalidTeamNumber {
                line,
                value: value.to_string(),
            })?,
        };
        highest = highest.max(team_number);
        entries.push(RosterEntry {
            name: row.name,
            team_number,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_numbers() {
        let csv = "name,team_number\nOwls, 2\nFoxes,1\n";
        let entries = parse_roster(csv.as_bytes()).unwrap();
        assert_eq!(
            entries,
            vec![
                RosterEntry { name: "Owls".into(), team_number: 2 },
                RosterEntry { name: "Foxes".into(), team_number: 1 },
            ]
        );
    }

    #[test]
    fn missing_numbers_continue_after_highest() {
        let csv = "name,team_number\nA,5\nB,\nC,3\nD,\n";
        let numbers: Vec<_> = parse_roster(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(|e| e.team_number)
            .collect();
        assert_eq!(numbers, [5, 6, 3, 7]);
    }

    #[test]
    fn name_only_column() {
        let csv = "name\nA\nB\n";
        let numbers: Vec<_> = parse_roster(csv.as_bytes())
            .unwrap()
            .into_iter()
            .map(|e| e.team_number)
            .collect();
        assert_eq!(numbers, [1, 2]);
    }

    #[test]
    fn rejects_bad_number_with_line() {
        let csv = "name,team_number\nA,1\nB,two\n";
        match parse_roster(csv.as_bytes()) {
            Err(RosterError::InvalidTeamNumber { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "two");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn unnumbered_row_after_max_seed_is_rejected() {
        let csv = "name,team_number\nA,2147483647\nB,\n";
        assert!(matches!(
            parse_roster(csv.as_bytes()),
            Err(RosterError::SeedOverflow { line: 3 })
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let csv = "name,team_number\n  ,1\n";
        assert!(matches!(
            parse_roster(csv.as_bytes()),
            Err(RosterError::EmptyName { line: 2 })
        ));
    }
}

//! Match generation: dispatcher plus round-robin and single-elimination builders.

mod generate;
mod round_robin;
mod seeding;
mod single_elimination;

pub use generate::generate_matches;
pub use round_robin::round_robin_matches;
pub use seeding::sorted_by_seed;
pub use single_elimination::{bracket_capacity, single_elimination_matches, MAX_BRACKET_TEAMS};

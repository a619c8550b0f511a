pub mod aggregate;
pub mod ranking;
pub mod scoreboard;
pub mod sort;
pub mod validation;

pub use aggregate::{aggregate_rollups, scored_rounds, RoundScore, TeamRollup, Visibility};
pub use ranking::{rank_teams, rank_with_ties, RankLabel, RankedRollup};
pub use scoreboard::Scoreboard;
pub use sort::{sort_for_display, SortDirection, SortKey, SortState};
pub use validation::{validate_round, RoundEntry};

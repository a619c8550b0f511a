use super::aggregate::{aggregate_rollups, scored_rounds, Visibility};
use super::ranking::{rank_teams, RankedRollup};
use super::sort::{sort_for_display, SortState};
use crate::snapshot::Snapshot;

/// Display-ready scoreboard for one view: ranked rows in standings order plus
/// the round columns visible to that view. Recomputed from every snapshot.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    /// Rows in standings order (always total descending once published).
    pub rows: Vec<RankedRollup>,
    /// Visible scored rounds, ascending; the breakdown columns.
    pub rounds: Vec<u32>,
    pub published_rounds: u32,
    pub total_rounds: u32,
    pub visibility: Visibility,
    has_tipovacka: Vec<bool>,
}

impl Scoreboard {
    /// Build the scoreboard for a snapshot. A missing config or an empty
    /// team list yields an empty board; presenting "no data" is the
    /// caller's concern.
    pub fn build(snapshot: &Snapshot, visibility: Visibility) -> Scoreboard {
        let Some(config) = &snapshot.config else {
            return Scoreboard::empty(visibility);
        };
        if snapshot.teams.is_empty() {
            return Scoreboard::empty(visibility);
        }

        let rollups = aggregate_rollups(config, &snapshot.teams, &snapshot.scores, visibility);
        let rows = rank_teams(&rollups, config.published_rounds);
        let rounds = scored_rounds(config, &snapshot.scores, visibility);

        Scoreboard {
            rows,
            rounds,
            published_rounds: config.published_rounds,
            total_rounds: config.rounds,
            visibility,
            has_tipovacka: config.has_tipovacka.clone(),
        }
    }

    fn empty(visibility: Visibility) -> Scoreboard {
        Scoreboard {
            rows: Vec::new(),
            rounds: Vec::new(),
            published_rounds: 0,
            total_rounds: 0,
            visibility,
            has_tipovacka: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether the tipovacka bonus applied in a round (drives the "std + 1"
    /// cell rendering).
    pub fn round_has_tipovacka(&self, round_number: u32) -> bool {
        round_number >= 1
            && self
                .has_tipovacka
                .get(round_number as usize - 1)
                .copied()
                .unwrap_or(false)
    }

    /// Breakdown rows under the given sort selection. Rank labels travel
    /// with their teams; only row order changes.
    pub fn breakdown_rows(&self, sort: SortState) -> Vec<RankedRollup> {
        let mut rows = self.rows.clone();
        sort_for_display(&mut rows, sort);
        rows
    }

    /// Progress line shown above the board.
    pub fn round_indicator(&self) -> String {
        match self.visibility {
            Visibility::Public => {
                if self.published_rounds > 0 {
                    format!("Round {} of {}", self.published_rounds, self.total_rounds)
                } else {
                    "No rounds published yet".to_string()
                }
            }
            Visibility::Admin => match self.rounds.last() {
                Some(last) => format!("Round {} of {}", last, self.total_rounds),
                None => "No rounds scored yet".to_string(),
            },
        }
    }
}

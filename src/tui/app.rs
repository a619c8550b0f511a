use std::time::{Duration, Instant};

use crate::scoring::{Scoreboard, SortKey, SortState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Standings,
    Breakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

/// State of the public scoreboard TUI. Sort selection and the active tab are
/// explicit fields here; rendering reads them, key handling mutates them.
pub struct App {
    pub board: Scoreboard,
    pub table_state: ratatui::widgets::TableState,
    pub current_tab: Tab,
    pub sort: SortState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub last_refresh: Instant,
    pub needs_refresh: bool,
    pub should_quit: bool,
    pub refresh_interval: Duration,
}

impl App {
    pub fn new(board: Scoreboard, refresh_interval: Duration) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        if !board.rows.is_empty() {
            table_state.select(Some(0));
        }

        Self {
            board,
            table_state,
            current_tab: Tab::Standings,
            sort: SortState::default(),
            input_mode: InputMode::Normal,
            flash_message: None,
            last_refresh: Instant::now(),
            needs_refresh: false,
            should_quit: false,
            refresh_interval,
        }
    }

    pub fn next_row(&mut self) {
        let len = self.board.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub fn previous_row(&mut self) {
        let len = self.board.rows.len();
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    /// Toggle between the Standings and Breakdown tabs.
    pub fn toggle_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Standings => Tab::Breakdown,
            Tab::Breakdown => Tab::Standings,
        };
        if self.board.rows.is_empty() {
            self.table_state.select(None);
        } else {
            self.table_state.select(Some(0));
        }
    }

    /// Sort the breakdown by total (re-selecting flips direction).
    pub fn sort_by_total(&mut self) {
        if self.current_tab == Tab::Breakdown {
            self.sort.toggle(SortKey::Total);
        }
    }

    /// Sort the breakdown by the nth visible round column (1-based).
    pub fn sort_by_round_column(&mut self, column: usize) {
        if self.current_tab != Tab::Breakdown {
            return;
        }
        if let Some(&round) = self.board.rounds.get(column.wrapping_sub(1)) {
            self.sort.toggle(SortKey::Round(round));
        }
    }

    /// Swap in a freshly built board, keeping the selection valid.
    pub fn update_board(&mut self, board: Scoreboard) {
        self.board = board;

        if self.board.rows.is_empty() {
            self.table_state.select(None);
        } else if let Some(selected) = self.table_state.selected() {
            if selected >= self.board.rows.len() {
                self.table_state.select(Some(self.board.rows.len() - 1));
            }
        } else {
            self.table_state.select(Some(0));
        }

        // Drop a round sort whose column disappeared (e.g. after a reset)
        if let SortKey::Round(round) = self.sort.key {
            if !self.board.rounds.contains(&round) {
                self.sort = SortState::default();
            }
        }

        self.last_refresh = Instant::now();
        self.show_flash(format!("Refreshed ({} teams)", self.board.rows.len()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuizConfig, ScoreRecord, Team};
    use crate::scoring::{SortDirection, Visibility};
    use crate::snapshot::Snapshot;
    use chrono::Utc;

    fn sample_board(published: u32) -> Scoreboard {
        let config = QuizConfig {
            rounds: 3,
            questions_per_round: 10,
            has_tipovacka: vec![false; 3],
            published_rounds: published,
        };
        let team = |id, name: &str| Team {
            id,
            name: name.to_string(),
            player_count: 1,
            shots_bonus: false,
        };
        let record = |team_id, round, std| ScoreRecord {
            team_id,
            round_number: round,
            standard_points: std,
            tipovacka_point: 0,
            updated_at: Utc::now(),
        };
        let snapshot = Snapshot {
            config: Some(config),
            teams: vec![team(1, "Alpha"), team(2, "Bravo")],
            scores: vec![
                record(1, 1, 5.0),
                record(2, 1, 7.0),
                record(1, 2, 6.0),
                record(2, 2, 3.0),
            ],
        };
        Scoreboard::build(&snapshot, Visibility::Public)
    }

    #[test]
    fn test_sort_keys_only_apply_on_breakdown_tab() {
        let mut app = App::new(sample_board(2), Duration::from_secs(15));
        app.sort_by_total();
        assert_eq!(app.sort.direction, SortDirection::Descending); // Unchanged

        app.toggle_tab();
        app.sort_by_total();
        assert_eq!(app.sort.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_round_column_maps_to_visible_rounds() {
        let mut app = App::new(sample_board(2), Duration::from_secs(15));
        app.toggle_tab();

        app.sort_by_round_column(2);
        assert_eq!(app.sort.key, SortKey::Round(2));

        // Column 3 doesn't exist with two published rounds
        app.sort_by_round_column(3);
        assert_eq!(app.sort.key, SortKey::Round(2));
    }

    #[test]
    fn test_update_board_resets_stale_round_sort() {
        let mut app = App::new(sample_board(2), Duration::from_secs(15));
        app.toggle_tab();
        app.sort_by_round_column(2);

        // Publication rolled back; round 2 column is gone
        app.update_board(sample_board(1));
        assert_eq!(app.sort, SortState::default());
    }

    #[test]
    fn test_row_navigation_wraps() {
        let mut app = App::new(sample_board(2), Duration::from_secs(15));
        assert_eq!(app.table_state.selected(), Some(0));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(1));
        app.next_row();
        assert_eq!(app.table_state.selected(), Some(0));
        app.previous_row();
        assert_eq!(app.table_state.selected(), Some(1));
    }
}

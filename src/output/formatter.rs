use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{RankedRollup, Scoreboard, SortState, TeamRollup};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a point value: half points keep one decimal, whole points drop it
/// ("7", "7.5").
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        format!("{:.1}", points)
    }
}

/// One breakdown cell: "-" with no record, "std + 1" when the tipovacka
/// point was won, otherwise the plain sum.
pub fn format_round_cell(board: &Scoreboard, rollup: &TeamRollup, round_number: u32) -> String {
    match rollup.rounds.get(&round_number) {
        None => "-".to_string(),
        Some(score) if score.tip == 1 && board.round_has_tipovacka(round_number) => {
            format!("{} + 1", format_points(score.std))
        }
        Some(score) => format_points(score.points()),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a team name to fit its column, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn name_column_width(rows: &[RankedRollup]) -> usize {
    let widest = rows
        .iter()
        .map(|r| r.rollup.team.name.chars().count())
        .max()
        .unwrap_or(4);
    // Narrow terminals squeeze the name column before anything else
    let cap = match get_terminal_width() {
        Some(width) if width < 60 => 14,
        _ => 28,
    };
    widest.clamp(4, cap)
}

/// Apply the gold/silver/bronze highlight for the top three ranks.
fn paint_rank(line: String, rank_number: usize, tied: bool, use_colors: bool) -> String {
    if !use_colors {
        return line;
    }
    match rank_number {
        1 => line.yellow().bold().to_string(),
        2 => line.white().bold().to_string(),
        3 if !tied => line.red().to_string(),
        _ => line,
    }
}

/// Format the standings (summary) view: rank, team, total.
/// Rows are always in total-descending standings order.
pub fn format_standings(board: &Scoreboard, use_colors: bool) -> String {
    if board.is_empty() {
        return "No quiz data yet.".to_string();
    }

    let name_width = name_column_width(&board.rows);
    let mut lines = vec![board.round_indicator()];
    lines.push(format!(
        "{:>5}  {:<name_width$}  {:>6}",
        "Rank", "Team", "Total"
    ));

    for row in &board.rows {
        let line = format!(
            "{:>5}  {:<name_width$}  {:>6}",
            row.rank.display(),
            truncate_name(&row.rollup.team.name, name_width),
            format_points(row.rollup.total),
        );
        lines.push(paint_rank(line, row.rank.number, row.rank.tied, use_colors));
    }

    lines.join("\n")
}

/// Format the round-by-round breakdown under the given sort selection.
pub fn format_breakdown(board: &Scoreboard, sort: SortState, use_colors: bool) -> String {
    if board.is_empty() {
        return "No quiz data yet.".to_string();
    }
    if board.rounds.is_empty() {
        return board.round_indicator();
    }

    let rows = board.breakdown_rows(sort);
    let name_width = name_column_width(&rows);
    let cell_width = 7; // Fits "10 + 1"

    let mut header = format!("{:>5}  {:<name_width$}", "Rank", "Team");
    for round in &board.rounds {
        header.push_str(&format!("  {:>cell_width$}", format!("R{}", round)));
    }
    header.push_str(&format!("  {:>6}", "Total"));

    let mut lines = vec![board.round_indicator(), header];
    for row in &rows {
        let mut line = format!(
            "{:>5}  {:<name_width$}",
            row.rank.display(),
            truncate_name(&row.rollup.team.name, name_width),
        );
        for round in &board.rounds {
            line.push_str(&format!(
                "  {:>cell_width$}",
                format_round_cell(board, &row.rollup, *round)
            ));
        }
        line.push_str(&format!("  {:>6}", format_points(row.rollup.total)));
        lines.push(paint_rank(line, row.rank.number, row.rank.tied, use_colors));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuizConfig, ScoreRecord, Team};
    use crate::scoring::Visibility;
    use crate::snapshot::Snapshot;
    use chrono::Utc;

    fn sample_board() -> Scoreboard {
        let config = QuizConfig {
            rounds: 2,
            questions_per_round: 10,
            has_tipovacka: vec![true, false],
            published_rounds: 2,
        };
        let team = |id, name: &str| Team {
            id,
            name: name.to_string(),
            player_count: 1,
            shots_bonus: false,
        };
        let record = |team_id, round, std, tip| ScoreRecord {
            team_id,
            round_number: round,
            standard_points: std,
            tipovacka_point: tip,
            updated_at: Utc::now(),
        };
        let snapshot = Snapshot {
            config: Some(config),
            teams: vec![team(1, "Alpha"), team(2, "Bravo")],
            scores: vec![
                record(1, 1, 5.0, 1),
                record(2, 1, 6.5, 0),
                record(1, 2, 4.0, 0),
            ],
        };
        Scoreboard::build(&snapshot, Visibility::Public)
    }

    #[test]
    fn test_format_points_trims_whole_numbers() {
        assert_eq!(format_points(7.0), "7");
        assert_eq!(format_points(7.5), "7.5");
        assert_eq!(format_points(0.0), "0");
    }

    #[test]
    fn test_round_cell_shows_tipovacka_split() {
        let board = sample_board();
        let alpha = &board
            .rows
            .iter()
            .find(|r| r.rollup.team.name == "Alpha")
            .unwrap()
            .rollup;

        assert_eq!(format_round_cell(&board, alpha, 1), "5 + 1");
        assert_eq!(format_round_cell(&board, alpha, 2), "4");
    }

    #[test]
    fn test_round_cell_dash_for_missing_record() {
        let board = sample_board();
        let bravo = &board
            .rows
            .iter()
            .find(|r| r.rollup.team.name == "Bravo")
            .unwrap()
            .rollup;
        assert_eq!(format_round_cell(&board, bravo, 2), "-");
    }

    #[test]
    fn test_standings_contains_ranks_and_totals() {
        let board = sample_board();
        let output = format_standings(&board, false);
        assert!(output.contains("Round 2 of 2"));
        assert!(output.contains("Alpha"));
        assert!(output.contains("10")); // Alpha: 5 + 1 + 4
        assert!(output.contains("6.5"));
    }

    #[test]
    fn test_breakdown_has_round_columns() {
        let board = sample_board();
        let output = format_breakdown(&board, SortState::default(), false);
        assert!(output.contains("R1"));
        assert!(output.contains("R2"));
        assert!(output.contains("5 + 1"));
        assert!(output.contains("-"));
    }

    #[test]
    fn test_empty_board_message() {
        let snapshot = Snapshot {
            config: None,
            teams: Vec::new(),
            scores: Vec::new(),
        };
        let board = Scoreboard::build(&snapshot, Visibility::Public);
        assert_eq!(format_standings(&board, false), "No quiz data yet.");
    }
}

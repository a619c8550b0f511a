use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::output::formatter::{format_points, format_round_cell};
use crate::scoring::{RankedRollup, SortDirection, SortKey};
use crate::tui::app::{App, InputMode, Tab};
use crate::tui::theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Table(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Scoreboard table
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    render_table(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    // Board name on the left, round indicator on the right
    let mut spans = vec![Span::styled(
        "Quiz Board",
        Style::default().fg(theme::TITLE_COLOR).bold(),
    )];

    let indicator = app.board.round_indicator();
    let left_len = "Quiz Board".len();
    let padding_len = (area.width as usize).saturating_sub(left_len + indicator.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(indicator, Style::default().fg(theme::MUTED)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let titles = vec!["Standings", "Breakdown"];
    let selected = match app.current_tab {
        Tab::Standings => 0,
        Tab::Breakdown => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(Style::default().fg(theme::TITLE_COLOR).bold().reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.board.is_empty() {
        let empty_msg = Paragraph::new("No quiz data yet")
            .alignment(Alignment::Center)
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    match app.current_tab {
        Tab::Standings => render_standings_table(frame, area, app),
        Tab::Breakdown => render_breakdown_table(frame, area, app),
    }
}

fn rank_cell(row: &RankedRollup) -> Cell<'static> {
    let label = row.rank.display();
    match theme::rank_color(row.rank.number) {
        Some(color) => Cell::from(label).style(Style::default().fg(color).bold()),
        None => Cell::from(label).style(Style::default().fg(theme::INDEX_COLOR)),
    }
}

fn row_style(idx: usize) -> Style {
    // Alternating row background (odd rows get subtle background)
    if idx % 2 == 1 {
        Style::default().bg(theme::ROW_ALT_BG)
    } else {
        Style::default()
    }
}

fn render_standings_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let rows: Vec<Row> = app
        .board
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            Row::new(vec![
                rank_cell(row),
                Cell::from(row.rollup.team.name.clone()),
                Cell::from(format_points(row.rollup.total)),
            ])
            .style(row_style(idx))
        })
        .collect();

    let widths = [
        Constraint::Length(5), // Rank: "T-12"
        Constraint::Fill(1),   // Team name
        Constraint::Length(7), // Total
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Rank", "Team", "Total"])
                .style(theme::HEADER_STYLE)
                .bottom_margin(1),
        )
        .row_highlight_style(theme::ROW_SELECTED);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_breakdown_table(frame: &mut Frame, area: Rect, app: &mut App) {
    let board = &app.board;
    let display_rows = board.breakdown_rows(app.sort);

    let marker = |key: SortKey| -> &'static str {
        if app.sort.key != key {
            return "";
        }
        match app.sort.direction {
            SortDirection::Descending => " v",
            SortDirection::Ascending => " ^",
        }
    };

    let mut header_cells = vec![Cell::from("Rank"), Cell::from("Team")];
    for round in &board.rounds {
        header_cells.push(Cell::from(format!(
            "R{}{}",
            round,
            marker(SortKey::Round(*round))
        )));
    }
    header_cells.push(Cell::from(format!("Total{}", marker(SortKey::Total))));

    let rows: Vec<Row> = display_rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut cells = vec![rank_cell(row), Cell::from(row.rollup.team.name.clone())];
            for round in &board.rounds {
                cells.push(Cell::from(format_round_cell(board, &row.rollup, *round)));
            }
            cells.push(Cell::from(format_points(row.rollup.total)));
            Row::new(cells).style(row_style(idx))
        })
        .collect();

    let mut widths = vec![Constraint::Length(5), Constraint::Fill(1)];
    widths.extend(board.rounds.iter().map(|_| Constraint::Length(8)));
    widths.push(Constraint::Length(8));

    let table = Table::new(rows, widths)
        .header(
            Row::new(header_cells)
                .style(theme::HEADER_STYLE)
                .bottom_margin(1),
        )
        .row_highlight_style(theme::ROW_SELECTED);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Refresh failed") {
            theme::FLASH_ERROR
        } else {
            theme::FLASH_SUCCESS
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let elapsed = app.last_refresh.elapsed();
        let refresh_time = if elapsed.as_secs() < 60 {
            format!("refreshed {}s ago", elapsed.as_secs())
        } else {
            format!("refreshed {}m ago", elapsed.as_secs() / 60)
        };

        let status = format!(
            "{} teams | {} | q quit | tab switch | t/1-9 sort | r refresh | ? help",
            app.board.rows.len(),
            refresh_time
        );
        Line::from(Span::styled(status, Style::default().fg(theme::MUTED)))
    };

    frame.render_widget(Paragraph::new(text), area);
}

fn render_help_popup(frame: &mut Frame) {
    let area = centered_rect(44, 13, frame.area());

    let lines = vec![
        Line::from(""),
        Line::from("  j/k, arrows   move selection"),
        Line::from("  tab           standings / breakdown"),
        Line::from("  t             sort breakdown by total"),
        Line::from("  1-9           sort breakdown by round"),
        Line::from("                (again to flip direction)"),
        Line::from("  r             refresh now"),
        Line::from("  q             quit"),
        Line::from(""),
        Line::from("  any key closes this help"),
    ];

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Keys ")
            .border_style(Style::default().fg(theme::TITLE_COLOR)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

/// Fixed-size rect centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

pub const TITLE_COLOR: Color = Color::Cyan;
pub const MUTED: Color = Color::Gray;
pub const INDEX_COLOR: Color = Color::DarkGray;
pub const ROW_ALT_BG: Color = Color::Indexed(235);

pub const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
pub const ROW_SELECTED: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const FLASH_SUCCESS: Color = Color::Green;
pub const FLASH_ERROR: Color = Color::Red;

// Podium highlight, matching the public page's rank-1..3 styling
pub const GOLD: Color = Color::Yellow;
pub const SILVER: Color = Color::White;
pub const BRONZE: Color = Color::Red;

/// Highlight color for a rank's row, top three only.
pub fn rank_color(rank_number: usize) -> Option<Color> {
    match rank_number {
        1 => Some(GOLD),
        2 => Some(SILVER),
        3 => Some(BRONZE),
        _ => None,
    }
}

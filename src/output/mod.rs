pub mod formatter;

pub use formatter::{
    format_breakdown, format_points, format_round_cell, format_standings, should_use_colors,
};

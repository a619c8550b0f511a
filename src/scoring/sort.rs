use std::cmp::Ordering;

use super::ranking::RankedRollup;

/// Column the breakdown table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Total,
    /// A specific 1-based round; keys on that round's std + tipovacka,
    /// 0 for teams without a record.
    Round(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Current sort selection of the breakdown table. Explicit value object
/// threaded through rendering rather than mutable module state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    /// Select a column: re-selecting the current one flips direction, a new
    /// column resets to descending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Descending;
        }
    }
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            key: SortKey::Total,
            direction: SortDirection::Descending,
        }
    }
}

/// Order breakdown rows by the selected column and direction.
///
/// Ties on the sort key fall back to total descending, then player count
/// ascending, then name. Row order only; assigned ranks are not touched.
pub fn sort_for_display(rows: &mut [RankedRollup], state: SortState) {
    rows.sort_by(|a, b| {
        let key_a = key_value(a, state.key);
        let key_b = key_value(b, state.key);

        let primary = match state.direction {
            SortDirection::Descending => key_b.partial_cmp(&key_a),
            SortDirection::Ascending => key_a.partial_cmp(&key_b),
        }
        .unwrap_or(Ordering::Equal);

        primary
            .then_with(|| {
                b.rollup
                    .total
                    .partial_cmp(&a.rollup.total)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| a.rollup.team.player_count.cmp(&b.rollup.team.player_count))
            .then_with(|| a.rollup.team.name.cmp(&b.rollup.team.name))
    });
}

fn key_value(row: &RankedRollup, key: SortKey) -> f64 {
    match key {
        SortKey::Total => row.rollup.total,
        SortKey::Round(round_number) => row.rollup.round_points(round_number),
    }
}

use std::collections::BTreeMap;

use crate::model::{QuizConfig, ScoreRecord, Team};

/// Which saved rounds an aggregation may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only rounds up to `published_rounds` count.
    Public,
    /// Every saved round counts, regardless of publication.
    Admin,
}

/// One round's saved contribution for a team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundScore {
    pub std: f64,
    pub tip: u8,
}

impl RoundScore {
    pub fn points(&self) -> f64 {
        self.std + f64::from(self.tip)
    }
}

/// Derived per-team aggregation. Not persisted; recomputed from every
/// snapshot.
#[derive(Debug, Clone)]
pub struct TeamRollup {
    pub team: Team,
    /// Sparse round -> score mapping; only rounds with a saved record.
    pub rounds: BTreeMap<u32, RoundScore>,
    pub total: f64,
}

impl TeamRollup {
    /// Points contributed by a single round, 0 when the team has no record
    /// for it. This is the display-sort key for round columns.
    pub fn round_points(&self, round_number: u32) -> f64 {
        self.rounds
            .get(&round_number)
            .map(|r| r.points())
            .unwrap_or(0.0)
    }
}

/// Fold score rows into per-team rollups.
///
/// Pure function of its inputs: filters rows by the visibility rule, seeds
/// each total with the shots bonus (flat +1, applied once, only after
/// publication has begun), then accumulates std + tipovacka per row. Rows
/// referencing an unknown team are skipped. Entered data is assumed valid;
/// nothing here re-validates or rewrites point values.
pub fn aggregate_rollups(
    config: &QuizConfig,
    teams: &[Team],
    scores: &[ScoreRecord],
    visibility: Visibility,
) -> Vec<TeamRollup> {
    let shots_active = config.published_rounds > 0;

    let mut rollups: Vec<TeamRollup> = teams
        .iter()
        .map(|team| {
            let shots_amount = if team.shots_bonus && shots_active {
                1.0
            } else {
                0.0
            };
            TeamRollup {
                team: team.clone(),
                rounds: BTreeMap::new(),
                total: shots_amount,
            }
        })
        .collect();

    let mut by_id: BTreeMap<u64, usize> = BTreeMap::new();
    for (idx, rollup) in rollups.iter().enumerate() {
        by_id.insert(rollup.team.id, idx);
    }

    for record in scores {
        if !record_visible(config, record.round_number, visibility) {
            continue;
        }
        // Unknown team ids should not occur, but must not be fatal
        let Some(&idx) = by_id.get(&record.team_id) else {
            continue;
        };
        let rollup = &mut rollups[idx];
        rollup.rounds.insert(
            record.round_number,
            RoundScore {
                std: record.standard_points,
                tip: record.tipovacka_point,
            },
        );
        rollup.total += record.points();
    }

    rollups
}

fn record_visible(config: &QuizConfig, round_number: u32, visibility: Visibility) -> bool {
    match visibility {
        Visibility::Admin => true,
        Visibility::Public => config.round_is_published(round_number),
    }
}

/// Rounds that have at least one saved record and pass the visibility rule,
/// ascending. These become the breakdown table columns.
pub fn scored_rounds(
    config: &QuizConfig,
    scores: &[ScoreRecord],
    visibility: Visibility,
) -> Vec<u32> {
    let mut rounds: Vec<u32> = scores
        .iter()
        .filter(|s| record_visible(config, s.round_number, visibility))
        .map(|s| s.round_number)
        .collect();
    rounds.sort_unstable();
    rounds.dedup();
    rounds
}

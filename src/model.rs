use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique team identifier, allocated by the record store.
pub type TeamId = u64;

/// Singleton quiz configuration. Created once by setup, deleted by reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    pub rounds: u32,              // Total rounds in the quiz
    pub questions_per_round: u32, // Max standard points per round
    pub has_tipovacka: Vec<bool>, // One flag per round: bonus point up for grabs?
    #[serde(default)]
    pub published_rounds: u32,    // 0..=rounds, rounds visible to the public view
}

impl QuizConfig {
    /// Whether the tipovacka bonus can be awarded in the given 1-based round.
    pub fn round_has_tipovacka(&self, round_number: u32) -> bool {
        round_number >= 1
            && self
                .has_tipovacka
                .get(round_number as usize - 1)
                .copied()
                .unwrap_or(false)
    }

    /// Whether the given 1-based round is visible to the public view.
    pub fn round_is_published(&self, round_number: u32) -> bool {
        round_number <= self.published_rounds
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,          // Unique display name
    #[serde(default = "default_player_count")]
    pub player_count: u32,     // Tie-break: fewer players ranks higher
    #[serde(default)]
    pub shots_bonus: bool,     // Flat +1 once any round is published
}

fn default_player_count() -> u32 {
    1
}

/// One saved score row, unique per (team, round). Always upserted whole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub team_id: TeamId,
    pub round_number: u32,    // 1-based
    pub standard_points: f64, // 0..=questions_per_round, half-point steps
    pub tipovacka_point: u8,  // 0 or 1; at most one team per round holds 1
    pub updated_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Combined contribution of this record to the team total.
    pub fn points(&self) -> f64 {
        self.standard_points + f64::from(self.tipovacka_point)
    }
}

/// Returns true for non-negative multiples of 0.5 (the valid point grid).
pub fn is_half_step(points: f64) -> bool {
    points >= 0.0 && (points * 2.0).fract() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_has_tipovacka_bounds() {
        let config = QuizConfig {
            rounds: 3,
            questions_per_round: 10,
            has_tipovacka: vec![true, false, true],
            published_rounds: 0,
        };
        assert!(config.round_has_tipovacka(1));
        assert!(!config.round_has_tipovacka(2));
        assert!(config.round_has_tipovacka(3));
        // Out of range rounds never qualify
        assert!(!config.round_has_tipovacka(0));
        assert!(!config.round_has_tipovacka(4));
    }

    #[test]
    fn test_record_points_includes_tipovacka() {
        let record = ScoreRecord {
            team_id: 1,
            round_number: 1,
            standard_points: 5.5,
            tipovacka_point: 1,
            updated_at: Utc::now(),
        };
        assert_eq!(record.points(), 6.5);
    }

    #[test]
    fn test_is_half_step() {
        assert!(is_half_step(0.0));
        assert!(is_half_step(3.5));
        assert!(is_half_step(10.0));
        assert!(!is_half_step(3.25));
        assert!(!is_half_step(-0.5));
    }
}

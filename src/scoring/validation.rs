use crate::model::{is_half_step, QuizConfig, Team, TeamId};

/// One team's entered points for a round being saved.
#[derive(Debug, Clone)]
pub struct RoundEntry {
    pub team_id: TeamId,
    pub standard_points: f64,
}

/// Validate a full round entry before it is upserted.
/// Returns all validation errors at once (not just the first).
pub fn validate_round(
    config: &QuizConfig,
    teams: &[Team],
    round_number: u32,
    entries: &[RoundEntry],
    tipovacka_team: Option<TeamId>,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if round_number < 1 || round_number > config.rounds {
        errors.push(format!(
            "round: {} is out of range (quiz has {} rounds)",
            round_number, config.rounds
        ));
    }

    let max = config.questions_per_round;
    for entry in entries {
        if teams.iter().all(|t| t.id != entry.team_id) {
            errors.push(format!("entries: unknown team id {}", entry.team_id));
            continue;
        }
        let name = team_name(teams, entry.team_id);
        if entry.standard_points < 0.0 || entry.standard_points > f64::from(max) {
            errors.push(format!(
                "{}: {} points out of range 0-{}",
                name, entry.standard_points, max
            ));
        } else if !is_half_step(entry.standard_points) {
            errors.push(format!(
                "{}: {} is not a multiple of 0.5",
                name, entry.standard_points
            ));
        }
    }

    // A round save must cover every team exactly once
    for team in teams {
        let count = entries.iter().filter(|e| e.team_id == team.id).count();
        if count == 0 {
            errors.push(format!("{}: missing points entry", team.name));
        } else if count > 1 {
            errors.push(format!("{}: duplicate points entry", team.name));
        }
    }

    if let Some(tip_id) = tipovacka_team {
        if !config.round_has_tipovacka(round_number) {
            errors.push(format!(
                "tipovacka: round {} has no tipovacka bonus",
                round_number
            ));
        }
        if teams.iter().all(|t| t.id != tip_id) {
            errors.push(format!("tipovacka: unknown team id {}", tip_id));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn team_name(teams: &[Team], id: TeamId) -> String {
    teams
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("team {}", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> QuizConfig {
        QuizConfig {
            rounds: 3,
            questions_per_round: 10,
            has_tipovacka: vec![true, false, true],
            published_rounds: 0,
        }
    }

    fn sample_teams() -> Vec<Team> {
        vec![
            Team {
                id: 1,
                name: "Alpha".to_string(),
                player_count: 1,
                shots_bonus: false,
            },
            Team {
                id: 2,
                name: "Bravo".to_string(),
                player_count: 1,
                shots_bonus: false,
            },
        ]
    }

    fn entry(team_id: TeamId, points: f64) -> RoundEntry {
        RoundEntry {
            team_id,
            standard_points: points,
        }
    }

    #[test]
    fn test_valid_round() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            1,
            &[entry(1, 7.5), entry(2, 6.0)],
            Some(1),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_out_of_range_points() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            1,
            &[entry(1, 11.0), entry(2, 6.0)],
            None,
        );
        let errors = result.unwrap_err();
        assert!(errors[0].contains("Alpha"));
        assert!(errors[0].contains("out of range"));
    }

    #[test]
    fn test_points_must_be_half_steps() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            1,
            &[entry(1, 7.25), entry(2, 6.0)],
            None,
        );
        let errors = result.unwrap_err();
        assert!(errors[0].contains("multiple of 0.5"));
    }

    #[test]
    fn test_missing_team_entry() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            1,
            &[entry(1, 7.0)],
            None,
        );
        let errors = result.unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.contains("Bravo") && e.contains("missing")));
    }

    #[test]
    fn test_tipovacka_on_ineligible_round() {
        // Round 2 has no tipovacka in the sample config
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            2,
            &[entry(1, 7.0), entry(2, 6.0)],
            Some(1),
        );
        let errors = result.unwrap_err();
        assert!(errors[0].contains("no tipovacka bonus"));
    }

    #[test]
    fn test_round_out_of_range() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            4,
            &[entry(1, 7.0), entry(2, 6.0)],
            None,
        );
        let errors = result.unwrap_err();
        assert!(errors[0].contains("out of range"));
    }

    #[test]
    fn test_collects_all_errors() {
        let result = validate_round(
            &sample_config(),
            &sample_teams(),
            2,
            &[entry(1, -1.0)], // Negative points, Bravo missing
            Some(2),           // Round 2 is not tipovacka-eligible
        );
        let errors = result.unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}

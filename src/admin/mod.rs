use anyhow::{Context, Result};
use chrono::Utc;

use crate::model::{QuizConfig, ScoreRecord, Team, TeamId};
use crate::scoring::{validate_round, RoundEntry};
use crate::store::{RecordStore, TeamUpdate};

/// Hard cap on quiz size, matching the setup form's limit.
pub const MAX_TEAMS: usize = 30;

/// Everything the one-time setup creates in a single batch.
#[derive(Debug, Clone)]
pub struct SetupRequest {
    pub rounds: u32,
    pub questions_per_round: u32,
    /// One flag per round; `true` means the tipovacka bonus is up for grabs.
    pub has_tipovacka: Vec<bool>,
    pub team_names: Vec<String>,
}

/// Create the quiz config and the team list. Fails if a quiz is already
/// configured; reset first.
pub fn run_setup(store: &mut dyn RecordStore, request: &SetupRequest) -> Result<Vec<Team>> {
    if store.get_config()?.is_some() {
        anyhow::bail!("Quiz is already configured. Run 'reset' to start over.");
    }
    if request.rounds < 1 {
        anyhow::bail!("Need at least one round");
    }
    if request.questions_per_round < 1 {
        anyhow::bail!("Need at least one question per round");
    }
    if request.has_tipovacka.len() != request.rounds as usize {
        anyhow::bail!(
            "Tipovacka flags cover {} rounds but the quiz has {}",
            request.has_tipovacka.len(),
            request.rounds
        );
    }

    let names: Vec<String> = request
        .team_names
        .iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();
    if names.is_empty() {
        anyhow::bail!("Enter at least one team name");
    }
    if names.len() > MAX_TEAMS {
        anyhow::bail!("Maximum {} teams", MAX_TEAMS);
    }
    let unique: std::collections::HashSet<&String> = names.iter().collect();
    if unique.len() != names.len() {
        anyhow::bail!("Duplicate team names found");
    }

    store
        .save_config(&QuizConfig {
            rounds: request.rounds,
            questions_per_round: request.questions_per_round,
            has_tipovacka: request.has_tipovacka.clone(),
            published_rounds: 0,
        })
        .context("Failed to save quiz config")?;

    store.insert_teams(&names).context("Failed to save teams")
}

/// Validate and upsert a full round of scores. Entries must cover every team;
/// `tipovacka_team` names the single bonus winner, if any.
pub fn save_round(
    store: &mut dyn RecordStore,
    round_number: u32,
    entries: &[RoundEntry],
    tipovacka_team: Option<TeamId>,
) -> Result<()> {
    let config = store
        .get_config()?
        .ok_or_else(|| anyhow::anyhow!("Quiz is not configured yet. Run 'setup' first."))?;
    let teams = store.list_teams()?;

    if let Err(errors) = validate_round(&config, &teams, round_number, entries, tipovacka_team) {
        anyhow::bail!("Invalid round entry:\n  - {}", errors.join("\n  - "));
    }

    let now = Utc::now();
    let rows: Vec<ScoreRecord> = entries
        .iter()
        .map(|entry| ScoreRecord {
            team_id: entry.team_id,
            round_number,
            standard_points: entry.standard_points,
            tipovacka_point: u8::from(tipovacka_team == Some(entry.team_id)),
            updated_at: now,
        })
        .collect();

    store
        .upsert_scores(&rows)
        .with_context(|| format!("Failed to save round {}", round_number))
}

/// Set how many rounds the public view may see.
pub fn publish_rounds(store: &mut dyn RecordStore, published_rounds: u32) -> Result<QuizConfig> {
    let mut config = store
        .get_config()?
        .ok_or_else(|| anyhow::anyhow!("Quiz is not configured yet. Run 'setup' first."))?;
    if published_rounds > config.rounds {
        anyhow::bail!(
            "Cannot publish {} rounds; the quiz has {}",
            published_rounds,
            config.rounds
        );
    }
    config.published_rounds = published_rounds;
    store.save_config(&config)?;
    Ok(config)
}

/// Update a team's mutable fields, addressed by name.
pub fn update_team(store: &mut dyn RecordStore, name: &str, update: &TeamUpdate) -> Result<Team> {
    if let Some(player_count) = update.player_count {
        if player_count < 1 {
            anyhow::bail!("Player count must be at least 1");
        }
    }
    let team = store
        .list_teams()?
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| anyhow::anyhow!("No team named '{}'", name))?;

    store.update_team(team.id, update)?;
    let updated = store
        .list_teams()?
        .into_iter()
        .find(|t| t.id == team.id)
        .ok_or_else(|| anyhow::anyhow!("Team '{}' vanished during update", name))?;
    Ok(updated)
}

/// Delete all quiz data: scores, then teams, then the config.
pub fn reset(store: &mut dyn RecordStore) -> Result<()> {
    store.delete_all_scores().context("Failed to delete scores")?;
    store.delete_all_teams().context("Failed to delete teams")?;
    store.delete_config().context("Failed to delete quiz config")?;
    Ok(())
}

pub mod json;
pub mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::model::{QuizConfig, ScoreRecord, Team, TeamId};

/// Partial update for a team's mutable fields. `None` leaves a field as-is.
#[derive(Debug, Clone, Default)]
pub struct TeamUpdate {
    pub player_count: Option<u32>,
    pub shots_bonus: Option<bool>,
}

/// Record-store contract the scoreboard is written against.
///
/// The scoring core never calls this directly; it consumes a `Snapshot` read
/// through these methods. Any backend honoring the contract (JSON file,
/// in-memory, a real database) is substitutable.
pub trait RecordStore {
    fn get_config(&self) -> Result<Option<QuizConfig>>;
    fn save_config(&mut self, config: &QuizConfig) -> Result<()>;
    fn delete_config(&mut self) -> Result<()>;

    /// All teams, ordered by name.
    fn list_teams(&self) -> Result<Vec<Team>>;
    /// Insert one team per name, allocating ids. Names must be new.
    fn insert_teams(&mut self, names: &[String]) -> Result<Vec<Team>>;
    fn update_team(&mut self, id: TeamId, update: &TeamUpdate) -> Result<()>;
    fn delete_all_teams(&mut self) -> Result<()>;

    /// All score rows, in no particular order.
    fn list_scores(&self) -> Result<Vec<ScoreRecord>>;
    /// Insert-or-replace on the (team_id, round_number) conflict key.
    fn upsert_scores(&mut self, rows: &[ScoreRecord]) -> Result<()>;
    fn delete_all_scores(&mut self) -> Result<()>;
}

/// The full quiz dataset as one document. Both backends mutate this shape;
/// the JSON backend additionally persists it after every write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizData {
    pub version: u32,
    pub next_team_id: TeamId,
    pub config: Option<QuizConfig>,
    pub teams: Vec<Team>,
    pub scores: Vec<ScoreRecord>,
}

impl QuizData {
    pub fn new() -> Self {
        QuizData {
            version: 1,
            next_team_id: 1,
            config: None,
            teams: Vec::new(),
            scores: Vec::new(),
        }
    }

    pub fn teams_by_name(&self) -> Vec<Team> {
        let mut teams = self.teams.clone();
        teams.sort_by(|a, b| a.name.cmp(&b.name));
        teams
    }

    pub fn insert_teams(&mut self, names: &[String]) -> Result<Vec<Team>> {
        for name in names {
            if self.teams.iter().any(|t| t.name == *name) {
                anyhow::bail!("Team '{}' already exists", name);
            }
        }
        let mut inserted = Vec::with_capacity(names.len());
        for name in names {
            let team = Team {
                id: self.next_team_id,
                name: name.clone(),
                player_count: 1,
                shots_bonus: false,
            };
            self.next_team_id += 1;
            self.teams.push(team.clone());
            inserted.push(team);
        }
        Ok(inserted)
    }

    pub fn update_team(&mut self, id: TeamId, update: &TeamUpdate) -> Result<()> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| anyhow::anyhow!("No team with id {}", id))?;
        if let Some(player_count) = update.player_count {
            team.player_count = player_count;
        }
        if let Some(shots_bonus) = update.shots_bonus {
            team.shots_bonus = shots_bonus;
        }
        Ok(())
    }

    pub fn upsert_scores(&mut self, rows: &[ScoreRecord]) {
        for row in rows {
            match self
                .scores
                .iter_mut()
                .find(|s| s.team_id == row.team_id && s.round_number == row.round_number)
            {
                Some(existing) => *existing = row.clone(),
                None => self.scores.push(row.clone()),
            }
        }
    }
}

impl Default for QuizData {
    fn default() -> Self {
        Self::new()
    }
}

use anyhow::Result;

use super::{QuizData, RecordStore, TeamUpdate};
use crate::model::{QuizConfig, ScoreRecord, Team, TeamId};

/// In-memory record store. Same contract as `JsonStore`, no persistence;
/// used by tests and useful for dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: QuizData,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            data: QuizData::new(),
        }
    }
}

impl RecordStore for MemoryStore {
    fn get_config(&self) -> Result<Option<QuizConfig>> {
        Ok(self.data.config.clone())
    }

    fn save_config(&mut self, config: &QuizConfig) -> Result<()> {
        self.data.config = Some(config.clone());
        Ok(())
    }

    fn delete_config(&mut self) -> Result<()> {
        self.data.config = None;
        Ok(())
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.data.teams_by_name())
    }

    fn insert_teams(&mut self, names: &[String]) -> Result<Vec<Team>> {
        self.data.insert_teams(names)
    }

    fn update_team(&mut self, id: TeamId, update: &TeamUpdate) -> Result<()> {
        self.data.update_team(id, update)
    }

    fn delete_all_teams(&mut self) -> Result<()> {
        self.data.teams.clear();
        Ok(())
    }

    fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.data.scores.clone())
    }

    fn upsert_scores(&mut self, rows: &[ScoreRecord]) -> Result<()> {
        self.data.upsert_scores(rows);
        Ok(())
    }

    fn delete_all_scores(&mut self) -> Result<()> {
        self.data.scores.clear();
        Ok(())
    }
}

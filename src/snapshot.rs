use anyhow::{Context, Result};

use crate::model::{QuizConfig, ScoreRecord, Team};
use crate::store::RecordStore;

/// One consistent read of the whole dataset. All aggregation and ranking runs
/// over a snapshot; the views poll the store and rebuild wholesale rather
/// than patching incrementally.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub config: Option<QuizConfig>,
    /// Ordered by name, as the store contract guarantees.
    pub teams: Vec<Team>,
    pub scores: Vec<ScoreRecord>,
}

impl Snapshot {
    pub fn load(store: &dyn RecordStore) -> Result<Snapshot> {
        let config = store.get_config().context("Failed to load quiz config")?;
        let teams = store.list_teams().context("Failed to load teams")?;
        let scores = store.list_scores().context("Failed to load scores")?;
        Ok(Snapshot {
            config,
            teams,
            scores,
        })
    }

    /// False when there is nothing worth rendering (no setup yet, or setup
    /// without teams).
    pub fn has_data(&self) -> bool {
        self.config.is_some() && !self.teams.is_empty()
    }
}

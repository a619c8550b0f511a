use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

use super::{QuizData, RecordStore, TeamUpdate};
use crate::model::{QuizConfig, ScoreRecord, Team, TeamId};

/// Record store backed by a single versioned JSON document.
///
/// The whole dataset is loaded at open and rewritten atomically after every
/// mutation, so readers polling the file never observe a partial write.
pub struct JsonStore {
    path: PathBuf,
    data: QuizData,
}

impl JsonStore {
    /// Open the store at `path`, creating an empty dataset if the file does
    /// not exist yet.
    pub fn open(path: &Path) -> Result<Self> {
        let data = load_data(path)?;
        Ok(JsonStore {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Re-read the document from disk, discarding the in-memory copy.
    /// The public view calls this on every poll.
    pub fn reload(&mut self) -> Result<()> {
        self.data = load_data(&self.path)?;
        Ok(())
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create data directory at {}", parent.display())
                })?;
            }
        }

        let mut file = AtomicWriteFile::open(&self.path)
            .with_context(|| format!("Failed to open atomic write file at {}", self.path.display()))?;
        serde_json::to_writer_pretty(&mut file, &self.data)
            .context("Failed to serialize quiz data")?;
        file.commit().context("Failed to save quiz data")?;
        Ok(())
    }
}

fn load_data(path: &Path) -> Result<QuizData> {
    if !path.exists() {
        return Ok(QuizData::new());
    }

    let file = File::open(path)
        .with_context(|| format!("Failed to open quiz data file at {}", path.display()))?;
    let data: QuizData = serde_json::from_reader(file).context("Failed to load quiz data")?;

    // Version check
    if data.version != 1 {
        anyhow::bail!("Unsupported quiz data version: {}", data.version);
    }

    Ok(data)
}

impl RecordStore for JsonStore {
    fn get_config(&self) -> Result<Option<QuizConfig>> {
        Ok(self.data.config.clone())
    }

    fn save_config(&mut self, config: &QuizConfig) -> Result<()> {
        self.data.config = Some(config.clone());
        self.save()
    }

    fn delete_config(&mut self) -> Result<()> {
        self.data.config = None;
        self.save()
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.data.teams_by_name())
    }

    fn insert_teams(&mut self, names: &[String]) -> Result<Vec<Team>> {
        let inserted = self.data.insert_teams(names)?;
        self.save()?;
        Ok(inserted)
    }

    fn update_team(&mut self, id: TeamId, update: &TeamUpdate) -> Result<()> {
        self.data.update_team(id, update)?;
        self.save()
    }

    fn delete_all_teams(&mut self) -> Result<()> {
        self.data.teams.clear();
        self.save()
    }

    fn list_scores(&self) -> Result<Vec<ScoreRecord>> {
        Ok(self.data.scores.clone())
    }

    fn upsert_scores(&mut self, rows: &[ScoreRecord]) -> Result<()> {
        self.data.upsert_scores(rows);
        self.save()
    }

    fn delete_all_scores(&mut self) -> Result<()> {
        self.data.scores.clear();
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_open_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("quiz_board_test_missing.json");
        // Ensure it doesn't exist
        let _ = std::fs::remove_file(&temp_path);

        let store = JsonStore::open(&temp_path).unwrap();
        assert!(store.get_config().unwrap().is_none());
        assert!(store.list_teams().unwrap().is_empty());
        assert!(store.list_scores().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload_roundtrip() {
        let temp_path = env::temp_dir().join("quiz_board_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = JsonStore::open(&temp_path).unwrap();
        store
            .save_config(&QuizConfig {
                rounds: 5,
                questions_per_round: 10,
                has_tipovacka: vec![true; 5],
                published_rounds: 2,
            })
            .unwrap();
        store
            .insert_teams(&["Alpha".to_string(), "Bravo".to_string()])
            .unwrap();

        // A second store opened on the same path sees the saved state
        let reopened = JsonStore::open(&temp_path).unwrap();
        let config = reopened.get_config().unwrap().unwrap();
        assert_eq!(config.rounds, 5);
        assert_eq!(config.published_rounds, 2);
        assert_eq!(reopened.list_teams().unwrap().len(), 2);

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_update_team_persists() {
        let temp_path = env::temp_dir().join("quiz_board_test_update.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut store = JsonStore::open(&temp_path).unwrap();
        let teams = store.insert_teams(&["Alpha".to_string()]).unwrap();
        store
            .update_team(
                teams[0].id,
                &TeamUpdate {
                    player_count: Some(4),
                    shots_bonus: Some(true),
                },
            )
            .unwrap();

        let reopened = JsonStore::open(&temp_path).unwrap();
        let teams = reopened.list_teams().unwrap();
        assert_eq!(teams[0].player_count, 4);
        assert!(teams[0].shots_bonus);

        let _ = std::fs::remove_file(&temp_path);
    }
}

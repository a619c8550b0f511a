mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Refresh cadence of the public board when the config doesn't say otherwise.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(15);

/// Get the config directory path (~/.config/quiz-board/)
pub fn get_config_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Could not determine home directory");
    home.join(".config").join("quiz-board")
}

/// Get the default config file path (~/.config/quiz-board/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Default location of the quiz data file.
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(get_config_dir)
        .join("quiz-board")
        .join("quiz.json")
}

/// Load configuration from a YAML file.
///
/// A missing file is not an error: the CLI works with defaults and the
/// `--data` flag. Unreadable or unparsable files are.
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!(
            "Failed to parse config: invalid YAML in {}",
            config_path.display()
        )
    })?;

    Ok(config)
}

impl Config {
    /// Data file path: CLI flag beats config file beats platform default.
    pub fn resolve_data_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.data_path.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_data_path)
    }

    /// Parsed refresh interval for the public board.
    pub fn refresh_interval(&self) -> Result<Duration> {
        match &self.refresh {
            Some(raw) => humantime::parse_duration(raw)
                .with_context(|| format!("Invalid refresh interval '{}'", raw)),
            None => Ok(DEFAULT_REFRESH),
        }
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Path to the quiz data file. Defaults to the platform data dir.
    pub data_path: Option<String>,
    /// Public board refresh interval, humantime format (e.g. "15s", "1m").
    pub refresh: Option<String>,
}

use core_types::ScoreWeights;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Score weights; anything not set in configuration keeps its default.
    pub weights: ScoreWeights,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppSettings {
    /// The log level for the application.
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

use config::{Config, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, Settings};

/// Loads the application settings from various sources.
///
/// Layered configuration loading:
/// 1. Reads from `config/base.toml` when present.
/// 2. Merges settings from environment variables (e.g.
///    `APP_WEIGHTS__WIN_RATE=0.3`). The prefix is `APP`, separator `__`.
///
/// A missing file is not an error; every setting has a compiled default.
pub fn load_settings() -> Result<Settings> {
    let settings = Config::builder()
        .add_source(File::with_name("config/base").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

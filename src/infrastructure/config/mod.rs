use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Runtime settings: defaults, then an optional TOML file, then WARTA_*
/// environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite database backing the content store
    pub database_path: PathBuf,

    /// Directory scanned for featured image files named in the CSV
    pub uploads_dir: PathBuf,

    /// Directory the store copies accepted asset bytes into
    pub media_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/warta.db"),
            uploads_dir: PathBuf::from("data/uploads"),
            media_dir: PathBuf::from("data/media"),
        }
    }
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        figment = match config_file {
            Some(path) => figment.merge(Toml::file_exact(path)),
            None => figment.merge(Toml::file("warta.toml")),
        };

        figment
            .merge(Env::prefixed("WARTA_"))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid settings: {}", e)))
    }
}

//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use crate::application::errors::ConfigError;

/// Phonebook configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Seed the contact table on startup. Turn it off after the first run.
    pub first_init: bool,
    pub seed_file: PathBuf,
    pub window: WindowConfig,
}

/// Database connection parameters
///
/// The embedded engine only uses `name`, as a file path. The remaining fields
/// are kept so a config written for a server engine still loads.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DatabaseConfig {
    pub name: PathBuf,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct WindowConfig {
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            first_init: false,
            seed_file: PathBuf::from("init_data.txt"),
            window: WindowConfig {
                title: "Phonebook".to_string(),
            },
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            name: PathBuf::from("phonebook.db"),
            user: None,
            password: None,
            host: None,
            port: None,
        }
    }
}

impl DatabaseConfig {
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        Self {
            name: path.into(),
            ..Self::default()
        }
    }

    /// Human-readable connection target with the password redacted
    pub fn describe(&self) -> String {
        let mut target = self.name.display().to_string();
        if let Some(host) = &self.host {
            let user = self.user.as_deref().unwrap_or("");
            let auth = match (&self.user, &self.password) {
                (Some(_), Some(_)) => format!("{}:***@", user),
                (Some(_), None) => format!("{}@", user),
                _ => String::new(),
            };
            let port = self.port.map(|p| format!(":{}", p)).unwrap_or_default();
            target = format!("{}{}{}/{}", auth, host, port, target);
        }
        target
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.name.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("database.name".to_string()));
        }
        if self.first_init && self.seed_file.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("seed-file".to_string()));
        }
        Ok(())
    }

    /// Override fields from `PHONEBOOK_*` environment variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(db) = std::env::var("PHONEBOOK_DB") {
            self.database.name = PathBuf::from(db);
        }

        if let Ok(flag) = std::env::var("PHONEBOOK_FIRST_INIT") {
            self.first_init = parse_flag(&flag)?;
        }

        if let Ok(seed) = std::env::var("PHONEBOOK_SEED_FILE") {
            self.seed_file = PathBuf::from(seed);
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue(format!("PHONEBOOK_FIRST_INIT={}", other))),
    }
}

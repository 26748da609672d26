//! Layered configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file, either passed explicitly or `config.toml` in the platform
//!    config directory (optional)
//! 3. environment variables prefixed with `HELPDESK_`, nested keys separated
//!    by `__` (`HELPDESK_AUTH__PASSWORD_HASH`)

use crate::auth::{Argon2Verifier, SessionPolicy};
use crate::error::Result;
use chrono::Duration;
use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";
const DATA_FILE_NAME: &str = "tickets.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpdeskConfig {
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding every ticket
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Staff account name
    pub username: String,
    /// Argon2 PHC string; without one every login is rejected
    #[serde(default)]
    pub password_hash: Option<String>,
    pub idle_timeout_minutes: u32,
    pub absolute_timeout_hours: u32,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "helpdesk", "helpdesk")
}

/// Default location of the ticket file
pub fn default_data_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from(DATA_FILE_NAME),
        |dirs| dirs.data_dir().join(DATA_FILE_NAME),
    )
}

/// Default location of the optional config file
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

impl HelpdeskConfig {
    /// Load configuration from every source
    ///
    /// An explicit `config_path` must exist; the default file may be absent.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::build(config_path, None)
    }

    /// Load with an explicit environment map instead of the process environment
    pub fn load_with_env(config_path: Option<&Path>, env: HashMap<String, String>) -> Result<Self> {
        Self::build(config_path, Some(env))
    }

    fn build(config_path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default(
                "storage.data_file",
                default_data_file().to_string_lossy().into_owned(),
            )?
            .set_default("auth.username", "admin")?
            .set_default("auth.idle_timeout_minutes", 120)?
            .set_default("auth.absolute_timeout_hours", 24)?;

        match config_path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            },
            None => {
                if let Some(path) = default_config_file() {
                    builder = builder.add_source(File::from(path).required(false));
                }
            },
        }

        let environment = Environment::with_prefix("HELPDESK")
            .prefix_separator("_")
            .separator("__")
            .source(env);

        let config: Self = builder.add_source(environment).build()?.try_deserialize()?;
        Ok(config)
    }

    /// Session lifetimes from the auth section
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy::new(
            Duration::minutes(i64::from(self.auth.idle_timeout_minutes)),
            Duration::hours(i64::from(self.auth.absolute_timeout_hours)),
        )
    }

    /// Credential verifier for the configured staff account
    pub fn verifier(&self) -> Result<Argon2Verifier> {
        Argon2Verifier::new(self.auth.username.clone(), self.auth.password_hash.clone())
    }
}

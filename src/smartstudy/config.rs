//! # Configuration
//!
//! Stored as `config.json` in the data directory. Every key is optional; a
//! missing file or missing key falls back to the compiled default.
//!
//! | Key                | Default                   | Description                              |
//! |--------------------|---------------------------|------------------------------------------|
//! | `db_name`          | `smartstudy_db`           | Prefix of every collection key           |
//! | `session_key`      | `smartstudy_current_user` | Key holding the signed-in user           |
//! | `seed_demo_data`   | `true`                    | Seed demo courses into a brand new store |
//! | `password_hashing` | Argon2 defaults           | Argon2id cost parameters                 |
//!
//! The data directory itself is resolved by the CLI: `--data-dir`, then
//! `SMARTSTUDY_HOME`, then the OS data directory.

use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_DB_NAME: &str = "smartstudy_db";
pub const DEFAULT_SESSION_KEY: &str = "smartstudy_current_user";
pub const DB_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudyConfig {
    #[serde(default = "default_db_name")]
    pub db_name: String,

    #[serde(default = "default_session_key")]
    pub session_key: String,

    #[serde(default = "default_true")]
    pub seed_demo_data: bool,

    #[serde(default)]
    pub password_hashing: HashingConfig,
}

/// Argon2id cost parameters used for new password hashes.
///
/// Existing hashes carry their own parameters, so changing these only
/// affects passwords set afterwards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashingConfig {
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

fn default_db_name() -> String {
    DEFAULT_DB_NAME.to_string()
}

fn default_session_key() -> String {
    DEFAULT_SESSION_KEY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

impl HashingConfig {
    /// The cheapest parameters Argon2 accepts. For tests only.
    pub fn fast() -> Self {
        Self {
            memory_kib: argon2::Params::MIN_M_COST,
            iterations: argon2::Params::MIN_T_COST,
            parallelism: 1,
        }
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            db_name: default_db_name(),
            session_key: default_session_key(),
            seed_demo_data: true,
            password_hashing: HashingConfig::default(),
        }
    }
}

impl StudyConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StudyError::Io)?;
        let config: StudyConfig =
            serde_json::from_str(&content).map_err(StudyError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StudyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StudyError::Serialization)?;
        fs::write(config_path, content).map_err(StudyError::Io)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.db_name.trim().is_empty() {
            return Err(StudyError::Config("db_name cannot be empty".to_string()));
        }
        if self.session_key.trim().is_empty() {
            return Err(StudyError::Config("session_key cannot be empty".to_string()));
        }
        if self.session_key.starts_with(&format!("{}_", self.db_name)) {
            return Err(StudyError::Config(format!(
                "session_key '{}' collides with collection keys of '{}'",
                self.session_key, self.db_name
            )));
        }
        Ok(())
    }
}

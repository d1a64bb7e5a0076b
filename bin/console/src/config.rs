//! Centralized console configuration.
//!
//! This module provides strongly-typed configuration for the console,
//! loaded via the `config` crate from environment variables with `__` as
//! the section separator (e.g. `API__BASE_URL`, `SESSION__STORAGE_PATH`).

use learnly_access::PermissionRules;
use serde::Deserialize;

use crate::error::StartupError;

/// Console configuration composed from defaulted sections.
#[derive(Debug, Deserialize)]
pub struct ConsoleConfig {
    /// Address the HTTP shell listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Remote Learnly API configuration.
    pub api: ApiConfig,

    /// Durable session storage configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Unread-notification polling configuration.
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Optional path to a JSON permission-rules document. When absent the
    /// compiled default table is used.
    #[serde(default)]
    pub rules_path: Option<String>,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Learnly REST API.
    pub base_url: String,
}

/// Session storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path of the JSON document holding the session namespace.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

/// Unread-notification polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Interval between unread-count polls, in seconds.
    #[serde(default = "default_unread_interval_seconds")]
    pub unread_interval_seconds: u64,
}

fn default_listen_addr() -> String {
    "127.0.0.1:4000".to_string()
}

fn default_storage_path() -> String {
    "learnly-session.json".to_string()
}

fn default_unread_interval_seconds() -> u64 {
    60
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            unread_interval_seconds: default_unread_interval_seconds(),
        }
    }
}

impl ConsoleConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> learnly_core::Result<Self, StartupError> {
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| StartupError::Config {
                details: e.to_string(),
            })?;
        Ok(config.try_deserialize().map_err(|e| StartupError::Config {
            details: e.to_string(),
        })?)
    }

    /// Loads the permission rule table: the configured JSON document when a
    /// path is set, the compiled console defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured document cannot be read or does
    /// not parse as a rule table.
    pub fn load_rules(&self) -> learnly_core::Result<PermissionRules, StartupError> {
        let Some(path) = &self.rules_path else {
            return Ok(PermissionRules::console_defaults());
        };
        let document =
            std::fs::read_to_string(path).map_err(|e| StartupError::RulesDocument {
                path: path.clone(),
                details: e.to_string(),
            })?;
        Ok(
            PermissionRules::from_json(&document).map_err(|e| StartupError::RulesDocument {
                path: path.clone(),
                details: e.to_string(),
            })?,
        )
    }
}

//! Configuration for tkt
//!
//! The store runs fine on defaults; a config file is optional.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// tkt configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ticket ID prefix (e.g., "tkt")
    pub ticket_prefix: String,

    /// Reply ID prefix (e.g., "rpl")
    pub reply_prefix: String,

    /// Default due window for new tickets, in hours.
    /// None means tickets have no due date unless one is set explicitly.
    pub default_due_hours: Option<i64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ticket_prefix: "tkt".to_string(),
            reply_prefix: "rpl".to_string(),
            default_due_hours: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Invalid config: {}", e)))?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)
            .map_err(|e| crate::Error::Config(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

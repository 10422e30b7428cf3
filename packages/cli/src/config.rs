use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::Level;

pub const DEFAULT_CONFIG_NAME: &str = "pagebuilder.config.json";

/// Pagebuilder configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Page name; seeds generated element ids
    #[serde(default = "default_page_name")]
    pub page_name: String,

    /// Log level for the editor (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Treat actions that had no effect as failures
    #[serde(default)]
    pub strict: bool,
}

fn default_page_name() -> String {
    "page".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn level(&self) -> anyhow::Result<Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid logLevel: {}", self.log_level))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_name: default_page_name(),
            log_level: default_log_level(),
            strict: false,
        }
    }
}

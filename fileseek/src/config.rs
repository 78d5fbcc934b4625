//! Search configuration.
//!
//! A `SearchConfig` is the immutable request a session is started with:
//! the root to walk, the term, and the match mode, plus the ambient knobs
//! (log level, poll cadence) the presentation layer reads.
//!
//! # Configuration locations
//!
//! Values can be loaded from YAML, in order of precedence:
//! 1. Custom config file passed explicitly (CLI `--config`)
//! 2. Local `.fileseek.yaml` in the current directory
//! 3. Global `$CONFIG_DIR/fileseek/config.yaml`
//!
//! CLI arguments take precedence over file values via [`SearchConfig::merge_with_cli`].
//!
//! ```yaml
//! # Root directory to search in
//! root_path: "."
//!
//! # Literal term to search for
//! term: "report"
//!
//! # Match mode (contains | starts-with | ends-with | content)
//! mode: "contains"
//!
//! # Log level (trace, debug, info, warn, error)
//! log_level: "warn"
//!
//! # Poll cadence for the result consumer, in milliseconds
//! poll_interval_ms: 100
//! ```

use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::matcher::MatchMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Root directory to start the search from
    pub root_path: PathBuf,

    /// Literal term to match (empty means no search; rejected at start)
    #[serde(default)]
    pub term: String,

    /// The string relation used against candidates
    #[serde(default = "default_mode")]
    pub mode: MatchMode,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Cadence on which the consumer polls the session, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_mode() -> MatchMode {
    MatchMode::NameContains
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_poll_interval_ms() -> u64 {
    100
}

impl SearchConfig {
    /// Convenience constructor with default log level and poll cadence.
    pub fn new(root_path: impl Into<PathBuf>, term: impl Into<String>, mode: MatchMode) -> Self {
        Self {
            root_path: root_path.into(),
            term: term.into(),
            mode,
            log_level: default_log_level(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }

    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        // Default config locations
        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("fileseek/config.yaml")),
            // Local config
            Some(PathBuf::from(".fileseek.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        // Add existing config files
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // Build and deserialize
        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        // CLI values take precedence over config file values
        if !cli_config.term.is_empty() {
            self.term = cli_config.term;
        }
        if cli_config.root_path != PathBuf::from(".") {
            self.root_path = cli_config.root_path;
        }
        // Mode always follows the CLI
        self.mode = cli_config.mode;
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        if cli_config.poll_interval_ms != default_poll_interval_ms() {
            self.poll_interval_ms = cli_config.poll_interval_ms;
        }
        self
    }
}

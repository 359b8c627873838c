//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};

use ballot_types::{ElectionParams, Identity};

use crate::logging::{self, LogFormat};
use crate::NodeError;

/// Configuration for a ballot node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Human-readable election name, attached to every log span.
    #[serde(default = "default_election_name")]
    pub election_name: String,

    /// Identity allowed to run administrator operations.
    #[serde(default = "default_administrator")]
    pub administrator: Identity,

    /// Whether every committed event is also written to the log as JSON.
    #[serde(default = "default_true")]
    pub log_events: bool,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registration edge-case behaviour. Kept last so it serializes as a table.
    #[serde(default)]
    pub params: ElectionParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_election_name() -> String {
    "election".to_string()
}

fn default_administrator() -> Identity {
    Identity::parse("admin").expect("literal identity is valid")
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, NodeError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| NodeError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("NodeConfig is always serializable to TOML")
    }

    /// The configured log format, validated.
    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        self.log_format.parse()
    }

    /// Install the global subscriber with the configured format and level.
    pub fn init_logging(&self) -> Result<(), NodeError> {
        logging::init_logging(self.log_format()?, &self.log_level)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            election_name: default_election_name(),
            administrator: default_administrator(),
            log_events: default_true(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            params: ElectionParams::default(),
        }
    }
}

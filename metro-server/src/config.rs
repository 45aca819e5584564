//! Server configuration.
//!
//! Every setting has a default and can be overridden by an environment
//! variable:
//!
//! | Variable | Default |
//! |---|---|
//! | `METRO_NETWORK_FILE` | `data/metro.txt` |
//! | `METRO_POSITIONS_FILE` | unset |
//! | `METRO_BIND_ADDR` | `127.0.0.1:3000` |
//! | `METRO_STATIC_DIR` | `static` |
//! | `METRO_WALK_PENALTY_SECS` | `10000` |

use std::net::SocketAddr;
use std::path::PathBuf;

/// Penalty, in seconds, on each synthetic edge added by connectivity
/// repair. Large enough that a bridge is only taken when nothing else
/// reaches the station.
pub const DEFAULT_WALK_PENALTY_SECS: u32 = 10_000;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    InvalidAddress { var: &'static str, value: String },

    #[error("{var}: invalid number '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: must be greater than zero")]
    NotPositive { var: &'static str },
}

/// Configuration for the metro server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Network description in the station/edge text format.
    pub network_file: PathBuf,

    /// Optional map positions for the stations.
    pub positions_file: Option<PathBuf>,

    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Weight of the edges connectivity repair adds.
    pub walk_penalty_secs: u32,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name
    /// to its value. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("METRO_NETWORK_FILE") {
            config.network_file = PathBuf::from(path);
        }
        config.positions_file = get("METRO_POSITIONS_FILE").map(PathBuf::from);
        if let Some(value) = get("METRO_BIND_ADDR") {
            config.bind_addr = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidAddress {
                    var: "METRO_BIND_ADDR",
                    value,
                })?;
        }
        if let Some(path) = get("METRO_STATIC_DIR") {
            config.static_dir = PathBuf::from(path);
        }
        if let Some(value) = get("METRO_WALK_PENALTY_SECS") {
            let var = "METRO_WALK_PENALTY_SECS";
            let secs: u32 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { var, value })?;
            if secs == 0 {
                return Err(ConfigError::NotPositive { var });
            }
            config.walk_penalty_secs = secs;
        }

        Ok(config)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            network_file: PathBuf::from("data/metro.txt"),
            positions_file: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
            walk_penalty_secs: DEFAULT_WALK_PENALTY_SECS,
        }
    }
}

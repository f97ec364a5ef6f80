//! Configuration loaded from environment variables, with defaults for local use.

use std::{env, path::PathBuf};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Secret used to sign sessions
    ///
    /// Opaque to the portal; kept so deployments can provide it alongside the rest.
    pub secret_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Default log filter, used when `RUST_LOG` is not set
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding `clubs.json` and `competitions.json`
    pub data_dir: PathBuf,
    /// Use the isolated `testing` sub-directory instead
    pub testing: bool,
}

impl StorageConfig {
    fn effective_dir(&self) -> PathBuf {
        if self.testing {
            self.data_dir.join("testing")
        } else {
            self.data_dir.clone()
        }
    }

    pub fn clubs_path(&self) -> PathBuf {
        self.effective_dir().join("clubs.json")
    }

    pub fn competitions_path(&self) -> PathBuf {
        self.effective_dir().join("competitions.json")
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
                port: lookup("PORT")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5000),
                log_level: lookup("RUST_LOG")
                    .unwrap_or_else(|| "club_booking_portal=info,tower_http=info".to_string()),
            },
            storage: StorageConfig {
                data_dir: lookup("DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from("data")),
                testing: lookup("TESTING").is_some_and(|s| is_truthy(&s)),
            },
            secret_key: lookup("SECRET_KEY").filter(|s| !s.is_empty()),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

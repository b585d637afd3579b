//! HTTP listener configuration

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const LOCAL_FRONTENDS: [&str; 2] = ["http://localhost:5173", "http://localhost:5174"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    /// Overridden by a bare `PORT` variable when present.
    pub port: u16,
    pub environment: Environment,
    /// Level for this crate's own targets when `RUST_LOG` is unset.
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub cors_origins: CorsOrigins,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Allowed browser origins.
///
/// Accepts either a list or one comma-separated string, so the same key
/// works from a TOML file and from `LESSON_HUB__SERVER__CORS_ORIGINS`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "OriginsRepr")]
pub struct CorsOrigins(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OriginsRepr {
    Joined(String),
    List(Vec<String>),
}

impl From<OriginsRepr> for CorsOrigins {
    fn from(repr: OriginsRepr) -> Self {
        let raw = match repr {
            OriginsRepr::Joined(joined) => joined.split(',').map(str::to_string).collect(),
            OriginsRepr::List(list) => list,
        };
        CorsOrigins(
            raw.into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        )
    }
}

impl Default for CorsOrigins {
    fn default() -> Self {
        CorsOrigins(LOCAL_FRONTENDS.iter().map(|s| s.to_string()).collect())
    }
}

impl CorsOrigins {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Default `EnvFilter` directive.
    pub fn log_filter(&self) -> String {
        format!("lesson_hub={},tower_http=info", self.log_level)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=300).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.cors_origins.as_slice().is_empty() {
            return Err(ValidationError::MissingRequired("SERVER__CORS_ORIGINS"));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: Environment::Development,
            log_level: "debug".to_string(),
            request_timeout_secs: 30,
            cors_origins: CorsOrigins::default(),
        }
    }
}

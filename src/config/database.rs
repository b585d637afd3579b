//! Database configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::mongo::StoreTimeouts;

use super::error::ValidationError;

/// Database configuration (MongoDB)
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// MongoDB connection string
    #[serde(default)]
    pub uri: String,

    /// Database name
    #[serde(default = "default_name")]
    pub name: String,

    /// Per-call storage timeout in milliseconds
    #[serde(default = "default_op_timeout")]
    pub op_timeout_ms: u64,

    /// Extra attempts for pure reads
    #[serde(default = "default_read_retries")]
    pub read_retries: u32,

    #[serde(default)]
    pub collections: CollectionNames,
}

/// Collection names, matching the existing data set
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectionNames {
    pub lessons: String,
    pub users: String,
    pub favorites: String,
    pub reports: String,
    pub comments: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            lessons: "All_lessons".to_string(),
            users: "users".to_string(),
            favorites: "favorites".to_string(),
            reports: "reports".to_string(),
            comments: "comments".to_string(),
        }
    }
}

impl DatabaseConfig {
    pub fn op_timeout(&self) -> Duration {
        Duration::from_millis(self.op_timeout_ms)
    }

    pub fn store_timeouts(&self) -> StoreTimeouts {
        StoreTimeouts {
            op_timeout: self.op_timeout(),
            read_retries: self.read_retries,
        }
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uri.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URI"));
        }
        if !self.uri.starts_with("mongodb://") && !self.uri.starts_with("mongodb+srv://") {
            return Err(ValidationError::InvalidDatabaseUri);
        }
        if self.name.is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__NAME"));
        }
        if self.op_timeout_ms == 0 || self.op_timeout_ms > 60_000 {
            return Err(ValidationError::InvalidOperationTimeout);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            name: default_name(),
            op_timeout_ms: default_op_timeout(),
            read_retries: default_read_retries(),
            collections: CollectionNames::default(),
        }
    }
}

fn default_name() -> String {
    "fail_guru_lesson".to_string()
}

fn default_op_timeout() -> u64 {
    5000
}

fn default_read_retries() -> u32 {
    2
}

//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use crate::adapters::auth::{FirebaseConfig, GOOGLE_SECURETOKEN_JWKS_URL};

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (Firebase ID tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Firebase project; both token issuer suffix and audience
    #[serde(default)]
    pub firebase_project_id: String,

    #[serde(default = "default_jwks_url")]
    pub jwks_url: String,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    pub fn firebase(&self) -> FirebaseConfig {
        FirebaseConfig::new(self.firebase_project_id.clone())
            .with_jwks_url(self.jwks_url.clone())
            .with_cache_duration(self.jwks_cache_ttl())
    }

    /// Validate authentication configuration
    ///
    /// In production the JWKS endpoint must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.firebase_project_id.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__FIREBASE_PROJECT_ID"));
        }
        if self.jwks_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWKS_URL"));
        }
        if *environment == Environment::Production && !self.jwks_url.starts_with("https://") {
            return Err(ValidationError::JwksUrlMustBeHttps);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            firebase_project_id: String::new(),
            jwks_url: default_jwks_url(),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_url() -> String {
    GOOGLE_SECURETOKEN_JWKS_URL.to_string()
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwks_cache_ttl_secs, 3600);
        assert_eq!(config.jwks_url, GOOGLE_SECURETOKEN_JWKS_URL);
    }

    #[test]
    fn test_jwks_cache_ttl_duration() {
        let config = AuthConfig {
            jwks_cache_ttl_secs: 7200,
            ..Default::default()
        };
        assert_eq!(config.jwks_cache_ttl(), Duration::from_secs(7200));
    }

    #[test]
    fn test_validation_missing_project() {
        let config = AuthConfig::default();
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__FIREBASE_PROJECT_ID"))
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = AuthConfig {
            firebase_project_id: "lesson-hub".to_string(),
            jwks_url: "http://localhost:9099/jwks".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::JwksUrlMustBeHttps)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        let config = AuthConfig {
            firebase_project_id: "lesson-hub".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Production).is_ok());
    }
}

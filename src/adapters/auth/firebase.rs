//! Firebase ID-token verifier.
//!
//! Implements `IdentityVerifier` by validating Firebase ID tokens:
//!
//! 1. Fetch Google's securetoken JWKS (cached with a TTL)
//! 2. Check the RS256 signature against the key named by `kid`
//! 3. Check issuer `https://securetoken.google.com/<project>`, audience
//!    `<project>` and expiry
//! 4. Map the claims onto `AuthenticatedUser`; the email claim is required

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedUser, Email};
use crate::ports::IdentityVerifier;

pub const GOOGLE_SECURETOKEN_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub jwks_url: String,
    pub jwks_cache_duration: Duration,
}

impl FirebaseConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jwks_url: GOOGLE_SECURETOKEN_JWKS_URL.to_string(),
            jwks_cache_duration: Duration::from_secs(3600),
        }
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = url.into();
        self
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = duration;
        self
    }

    fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    #[allow(dead_code)]
    sub: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    email_verified: Option<bool>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    picture: Option<String>,
}

struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
}

pub struct FirebaseIdentityVerifier {
    config: FirebaseConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl FirebaseIdentityVerifier {
    /// Keys are fetched lazily on first verification.
    pub fn new(config: FirebaseConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        tracing::debug!(url = %self.config.jwks_url, "fetching JWKS");

        let response = self
            .http_client
            .get(&self.config.jwks_url)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "failed to fetch JWKS");
                AuthError::service_unavailable(format!("Failed to fetch JWKS: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "JWKS endpoint returned an error");
            return Err(AuthError::service_unavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json::<JwkSet>().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse JWKS");
            AuthError::service_unavailable(format!("Failed to parse JWKS: {}", e))
        })
    }

    async fn get_jwks(&self, force_refresh: bool) -> Result<JwkSet, AuthError> {
        if !force_refresh {
            let cache = self.jwks_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.fetched_at.elapsed() < self.config.jwks_cache_duration {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;
        *self.jwks_cache.write().await = Some(JwksCache {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.issuer()]);
        validation.set_audience(&[&self.config.project_id]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }

    fn decode_claims(&self, token: &str, key: &DecodingKey) -> Result<FirebaseClaims, AuthError> {
        decode::<FirebaseClaims>(token, key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => {
                        tracing::warn!(error = %e, "token validation failed");
                        AuthError::InvalidToken
                    }
                }
            })
    }

    #[cfg(test)]
    async fn with_cached_jwks(self, jwks: JwkSet) -> Self {
        *self.jwks_cache.write().await = Some(JwksCache {
            jwks,
            fetched_at: Instant::now(),
        });
        self
    }
}

#[async_trait]
impl IdentityVerifier for FirebaseIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidToken);
        }
        let kid = header.kid.ok_or(AuthError::InvalidToken)?;

        // Google rotates keys; an unknown kid gets one forced refresh.
        let mut jwks = self.get_jwks(false).await?;
        if jwks.find(&kid).is_none() {
            jwks = self.get_jwks(true).await?;
        }
        let jwk = jwks.find(&kid).ok_or_else(|| {
            tracing::warn!(kid = %kid, "no JWKS key for token");
            AuthError::InvalidToken
        })?;
        let key = DecodingKey::from_jwk(jwk).map_err(|_| AuthError::InvalidToken)?;

        let claims = self.decode_claims(token, &key)?;
        let email = claims
            .email
            .ok_or(AuthError::MissingEmail)
            .and_then(|raw| Email::new(raw).map_err(|_| AuthError::MissingEmail))?;

        let user = AuthenticatedUser::new(email, claims.name, claims.email_verified.unwrap_or(false));
        Ok(match claims.picture {
            Some(picture) => user.with_picture(picture),
            None => user,
        })
    }
}

impl std::fmt::Debug for FirebaseIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentityVerifier")
            .field("project_id", &self.config.project_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    const PROJECT: &str = "lesson-hub-test";
    const PRIVATE_KEY: &str = include_str!("testdata/rsa_private.pem");
    const JWKS: &str = include_str!("testdata/jwks.json");

    async fn verifier() -> FirebaseIdentityVerifier {
        let jwks: JwkSet = serde_json::from_str(JWKS).unwrap();
        FirebaseIdentityVerifier::new(
            FirebaseConfig::new(PROJECT).with_jwks_url("http://127.0.0.1:9/unreachable"),
        )
        .with_cached_jwks(jwks)
        .await
    }

    fn token(claims: serde_json::Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some("test-key-1".to_string());
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        encode(&header, &claims, &key).unwrap()
    }

    fn claims(email: Option<&str>) -> serde_json::Value {
        let now = chrono::Utc::now().timestamp();
        let mut claims = json!({
            "iss": format!("https://securetoken.google.com/{}", PROJECT),
            "aud": PROJECT,
            "sub": "uid-123",
            "iat": now,
            "exp": now + 600,
            "email_verified": true,
            "name": "Alice",
            "picture": "https://img.example/a.png",
        });
        if let Some(email) = email {
            claims["email"] = json!(email);
        }
        claims
    }

    #[test]
    fn issuer_is_derived_from_project() {
        assert_eq!(
            FirebaseConfig::new("demo").issuer(),
            "https://securetoken.google.com/demo"
        );
        assert_eq!(FirebaseConfig::new("demo").jwks_url, GOOGLE_SECURETOKEN_JWKS_URL);
    }

    #[tokio::test]
    async fn valid_token_yields_principal() {
        let user = verifier()
            .await
            .verify(&token(claims(Some("Alice@X.com"))))
            .await
            .unwrap();

        assert_eq!(user.email.as_str(), "alice@x.com");
        assert_eq!(user.display_name.as_deref(), Some("Alice"));
        assert_eq!(user.picture.as_deref(), Some("https://img.example/a.png"));
        assert!(user.email_verified);
    }

    #[tokio::test]
    async fn token_without_email_is_rejected() {
        let err = verifier().await.verify(&token(claims(None))).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingEmail));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let mut expired = claims(Some("a@x.com"));
        expired["exp"] = json!(chrono::Utc::now().timestamp() - 3600);
        let err = verifier().await.verify(&token(expired)).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_audience_is_rejected() {
        let mut other = claims(Some("a@x.com"));
        other["aud"] = json!("someone-else");
        let err = verifier().await.verify(&token(other)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_issuer_is_rejected() {
        let mut other = claims(Some("a@x.com"));
        other["iss"] = json!("https://securetoken.google.com/other");
        let err = verifier().await.verify(&token(other)).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let err = verifier().await.verify("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn unknown_kid_with_unreachable_jwks_is_service_unavailable() {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some("rotated-away".to_string());
        let key = EncodingKey::from_rsa_pem(PRIVATE_KEY.as_bytes()).unwrap();
        let token = encode(&header, &claims(Some("a@x.com")), &key).unwrap();

        let err = verifier().await.verify(&token).await.unwrap_err();
        assert!(err.is_transient());
    }

    #[test]
    fn verifier_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FirebaseIdentityVerifier>();
    }

    #[tokio::test]
    #[ignore = "Requires network access to Google"]
    async fn fetches_live_google_jwks() {
        let verifier = FirebaseIdentityVerifier::new(FirebaseConfig::new(PROJECT));
        let jwks = verifier.fetch_jwks().await.unwrap();
        assert!(!jwks.keys.is_empty());
    }
}

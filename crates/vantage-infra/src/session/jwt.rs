//! JWT session-cookie provider.

use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use vantage_core::error::CollaboratorError;
use vantage_core::ports::{SessionProvider, Subject};

/// Session validation configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            issuer: "vantage-identity".to_string(),
        }
    }
}

/// Internal JWT claims structure for deserialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // subject id assigned by the identity platform
    email: String,
    exp: i64,
    iss: String,
}

/// Session provider that validates HS256 session cookies locally.
///
/// The gateway only reads the subject out of an already-issued cookie;
/// issuance and refresh stay with the identity platform.
pub struct JwtSessionProvider {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionProvider {
    pub fn new(config: &SessionConfig) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        let mut validation = Validation::default();
        validation.set_issuer(&[&config.issuer]);

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            tracing::warn!("Using default session secret. Set SESSION_SECRET for production use.");
        }

        let config = SessionConfig {
            secret,
            issuer: std::env::var("SESSION_ISSUER")
                .unwrap_or_else(|_| "vantage-identity".to_string()),
        };
        Self::new(&config)
    }
}

#[async_trait]
impl SessionProvider for JwtSessionProvider {
    async fn current_subject(
        &self,
        token: Option<&str>,
    ) -> Result<Option<Subject>, CollaboratorError> {
        let Some(token) = token else {
            return Ok(None);
        };

        // Expired or malformed cookies mean "no valid session", not a
        // provider failure; the caller proceeds as anonymous.
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(Some(Subject {
                id: data.claims.sub,
                email: data.claims.email,
            })),
            Err(err) => {
                tracing::debug!(%err, "rejecting session token");
                Ok(None)
            }
        }
    }
}

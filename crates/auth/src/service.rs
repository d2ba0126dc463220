//! Token issuance and validation.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AuthError;
use crate::token_store::TokenStore;

/// Every issued token is registered under this user id; only it is accepted.
pub const SERVICE_USER_ID: u32 = 1;

pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carried by issued tokens (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct AuthService {
    secret: String,
    store: Arc<TokenStore>,
}

impl AuthService {
    pub fn new(secret: impl Into<String>, store: Arc<TokenStore>) -> Self {
        Self {
            secret: secret.into(),
            store,
        }
    }

    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Sign an HS256 token for `email` and register it.
    ///
    /// Credentials are not checked against any user directory; `password` is
    /// accepted for interface compatibility and never embedded in the token.
    pub fn generate_token(&self, email: &str, _password: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = TokenClaims {
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        self.store.add_token(token.clone(), SERVICE_USER_ID);
        info!(email, tokens = self.store.token_count(), "issued token");
        Ok(token)
    }

    /// A token is valid iff it is registered under [`SERVICE_USER_ID`].
    pub fn validate_token(&self, token: &str) -> bool {
        self.store.validate_token(token) == Some(SERVICE_USER_ID)
    }
}

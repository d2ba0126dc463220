//! `stocklens-auth`: token issuance and validation.
//!
//! Decoupled from HTTP: the API layer only sees [`AuthService`] and the
//! shared [`TokenStore`].

pub mod error;
pub mod service;
pub mod token_store;

pub use error::{AuthError, TokenStoreError};
pub use service::{AuthService, TokenClaims, SERVICE_USER_ID, TOKEN_TTL_HOURS};
pub use token_store::TokenStore;

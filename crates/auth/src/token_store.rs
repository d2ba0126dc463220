//! Thread-safe token → user id registry.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TokenStoreError;

#[derive(Debug, Default)]
pub struct TokenStore {
    tokens: RwLock<HashMap<String, u32>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) `token` for `user_id`.
    pub fn add_token(&self, token: impl Into<String>, user_id: u32) {
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.insert(token.into(), user_id);
    }

    pub fn validate_token(&self, token: &str) -> Option<u32> {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.get(token).copied()
    }

    pub fn token_count(&self) -> usize {
        let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        tokens.len()
    }

    /// Read `<token> <user_id>` lines; returns how many entries were added.
    ///
    /// Blank lines, lines with fewer than two fields and lines whose user id
    /// is not a number are skipped. Extra fields are ignored.
    pub fn load_from_reader<R: BufRead>(&self, reader: R) -> Result<usize, TokenStoreError> {
        let mut parsed = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let (Some(token), Some(user_id)) = (fields.next(), fields.next()) else {
                continue;
            };
            match user_id.parse::<u32>() {
                Ok(user_id) => parsed.push((token.to_string(), user_id)),
                Err(_) => debug!(token, user_id, "skipping token line with non-numeric user id"),
            }
        }

        let loaded = parsed.len();
        let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        tokens.extend(parsed);
        Ok(loaded)
    }

    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<usize, TokenStoreError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TokenStoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_from_reader(BufReader::new(file))
    }
}

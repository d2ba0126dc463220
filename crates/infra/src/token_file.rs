//! Start-up seeding of the token store from a `<token> <user_id>` file.

use std::path::Path;

use tracing::{info, warn};

use stocklens_auth::TokenStore;

/// Load tokens from `path` into `store`, returning how many were read.
///
/// A missing or unreadable file is logged and treated as empty.
pub fn seed_token_store(store: &TokenStore, path: impl AsRef<Path>) -> usize {
    let path = path.as_ref();
    match store.load_from_file(path) {
        Ok(loaded) => {
            info!(path = %path.display(), loaded, "loaded token file");
            loaded
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not load token file; continuing without it");
            0
        }
    }
}

//! Auth token handling.
//!
//! The backend expects a bearer token on every request. The token is read
//! from the environment (`PF_AUTH_TOKEN`) or from persistent storage under
//! a fixed key; there is no login or refresh flow — requests simply fail
//! server-side when the token is absent or invalid.

use crate::storage::{self, StorageManager};

/// Fixed storage key the token is persisted under.
pub const TOKEN_KEY: &str = "token";

/// Environment variable that overrides the stored token.
pub const TOKEN_ENV: &str = "PF_AUTH_TOKEN";

/// Resolves the auth token: environment first, stored token second.
///
/// Returns `None` when neither source has a non-empty value.
pub fn resolve_token(store: &dyn StorageManager) -> Option<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV) {
        let token = token.trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }

    storage::read_string(store, TOKEN_KEY)
}

/// Persists the token under the fixed storage key.
pub fn store_token(store: &dyn StorageManager, token: &str) -> std::io::Result<()> {
    store.write(TOKEN_KEY, token.trim().as_bytes())
}

/// Removes the stored token. Missing token is not an error.
pub fn clear_token(store: &dyn StorageManager) -> std::io::Result<()> {
    if store.exists(TOKEN_KEY) {
        store.delete(TOKEN_KEY)?;
    }
    Ok(())
}

/// Formats a token as an Authorization header value.
pub fn bearer_value(token: &str) -> String {
    format!("Bearer {token}")
}

/// Masks a token for log output, keeping only a short prefix.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 4 {
        return "****".to_string();
    }
    format!("{}****", &token[..4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BackendLocal;

    #[test]
    fn test_store_and_resolve_token() {
        let tmp = tempfile::tempdir().unwrap();
        let store = BackendLocal::new(tmp.path().to_str().unwrap()).unwrap();

        assert_eq!(resolve_token(&store), None);

        store_token(&store, "  secret123\n").unwrap();
        assert_eq!(resolve_token(&store), Some("secret123".to_string()));

        clear_token(&store).unwrap();
        assert_eq!(resolve_token(&store), None);

        // clearing twice is fine
        clear_token(&store).unwrap();
    }

    #[test]
    fn test_bearer_value() {
        assert_eq!(bearer_value("secret123"), "Bearer secret123");
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("secret123"), "secr****");
        assert_eq!(mask_token("abc"), "****");
        assert_eq!(mask_token(""), "****");
    }
}

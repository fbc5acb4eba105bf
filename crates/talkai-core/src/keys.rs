//! Key store: inbound client credentials and the outbound TalkAI credential.
//!
//! Inbound keys come from the `PASSWORD` env var (comma-separated). The
//! outbound key is the first entry of `client_api_keys.json`; when the file
//! is missing a fresh one is minted at startup so the file always exists
//! after first launch. Both are read once and never reloaded.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use talkai_types::ConfigError;
use tracing::{info, warn};
use uuid::Uuid;

/// Default path of the outbound key file, relative to the working directory.
pub const CLIENT_KEYS_FILE: &str = "client_api_keys.json";

/// Env var holding comma-separated inbound client keys.
pub const INBOUND_KEYS_ENV: &str = "PASSWORD";

/// Mint a fresh client key in the `sk-talkai-` format.
pub fn mint_client_key() -> String {
    format!("sk-talkai-{}", Uuid::new_v4().simple())
}

/// Parse a comma-separated key list; entries are trimmed, empties dropped.
pub fn parse_inbound_keys(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load inbound client keys from the environment.
///
/// An absent or empty `PASSWORD` leaves the gateway in open mode, which is
/// logged loudly because it accepts unauthenticated traffic.
pub fn load_inbound_keys_from_env() -> HashSet<String> {
    let keys = std::env::var(INBOUND_KEYS_ENV)
        .map(|raw| parse_inbound_keys(&raw))
        .unwrap_or_default();

    if keys.is_empty() {
        warn!("{} not set - inbound authentication is DISABLED", INBOUND_KEYS_ENV);
    } else {
        info!("Loaded {} inbound client key(s)", keys.len());
    }
    keys
}

/// Read the outbound TalkAI key: first entry of the JSON array at `path`.
///
/// An empty array is valid and means unauthenticated upstream requests.
pub fn load_outbound_key(path: &Path) -> Result<Option<String>, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound { path: path.display().to_string() });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&e))?;
    let keys: Vec<String> =
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;

    Ok(keys.into_iter().next())
}

/// Create the outbound key file with one freshly minted key if it is absent.
///
/// Returns the minted key when bootstrap happened, `None` when the file was
/// already there.
pub fn ensure_outbound_key_file(path: &Path) -> Result<Option<String>, ConfigError> {
    if path.exists() {
        return Ok(None);
    }

    let key = mint_client_key();
    let content = serde_json::to_string_pretty(&vec![key.clone()])
        .map_err(|e| ConfigError::from_json_error(&e))?;
    fs::write(path, content).map_err(|e| ConfigError::from_io_error(&e))?;

    info!("Bootstrapped {} with a generated key", path.display());
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_key_format() {
        let key = mint_client_key();
        assert!(key.starts_with("sk-talkai-"));
        assert_eq!(key.len(), "sk-talkai-".len() + 32);
        assert_ne!(key, mint_client_key());
    }

    #[test]
    fn test_parse_inbound_keys() {
        let keys = parse_inbound_keys("sk-a, sk-b ,,sk-a,  ");
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("sk-a"));
        assert!(keys.contains("sk-b"));

        assert!(parse_inbound_keys("").is_empty());
        assert!(parse_inbound_keys(" , ,").is_empty());
    }

    #[test]
    fn test_bootstrap_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_api_keys.json");

        let minted = ensure_outbound_key_file(&path).unwrap().unwrap();
        assert!(minted.starts_with("sk-talkai-"));

        // Second call is a no-op.
        assert!(ensure_outbound_key_file(&path).unwrap().is_none());

        let loaded = load_outbound_key(&path).unwrap().unwrap();
        assert_eq!(loaded, minted);
    }

    #[test]
    fn test_load_first_key_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(&path, r#"["sk-first", "sk-second"]"#).unwrap();

        assert_eq!(load_outbound_key(&path).unwrap().unwrap(), "sk-first");
    }

    #[test]
    fn test_load_empty_array_means_no_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(&path, "[]").unwrap();

        assert!(load_outbound_key(&path).unwrap().is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_outbound_key(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");
        fs::write(&path, "{\"not\": \"a list\"}").unwrap();

        let err = load_outbound_key(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}

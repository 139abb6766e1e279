//! API-key storage with keyring, env, and file tiers.

use std::fs;
use std::path::PathBuf;

use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "prism-cli";
const KEYRING_USER: &str = "api-key";
const ENV_API_KEY: &str = "PRISM_API_KEY";
const CREDENTIALS_FILE_NAME: &str = "credentials";

/// Returns the keyring service name.
///
/// Defaults to `"prism-cli"`. Override via `PRISM_KEYRING_SERVICE` env var
/// for testing to avoid touching production credentials.
fn keyring_service() -> String {
    std::env::var("PRISM_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Store an API key in the OS keychain. Falls back to file if keyring
/// is unavailable.
///
/// # Errors
///
/// Returns [`AuthError::StoreError`] if both keyring and file storage fail.
pub fn store(api_key: &str) -> Result<(), AuthError> {
    match keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        Ok(entry) => match entry.set_password(api_key) {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                store_file(api_key)
            }
        },
        Err(error) => {
            tracing::warn!(%error, "keyring unavailable; falling back to file");
            store_file(api_key)
        }
    }
}

/// Load the API key. Priority: keyring → `PRISM_API_KEY` env → credentials
/// file.
#[must_use]
pub fn load() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && let Ok(key) = entry.get_password()
        && !key.is_empty()
    {
        return Some(key);
    }

    if let Ok(key) = std::env::var(ENV_API_KEY) {
        if !key.is_empty() {
            return Some(key);
        }
    }

    load_file()
}

/// Delete the stored API key from keyring and file.
///
/// # Errors
///
/// Returns [`AuthError::StoreError`] if the credentials file cannot be
/// removed.
pub fn delete() -> Result<(), AuthError> {
    // Delete from keyring (ignore errors — may not exist)
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER) {
        let _ = entry.delete_credential();
    }

    let path = credentials_path()?;
    if path.exists() {
        fs::remove_file(&path).map_err(|e| {
            AuthError::StoreError(format!("failed to delete {}: {e}", path.display()))
        })?;
    }

    Ok(())
}

/// Detect which tier the current key came from (for status display).
#[must_use]
pub fn detect_source() -> Option<String> {
    if let Ok(entry) = keyring::Entry::new(&keyring_service(), KEYRING_USER)
        && entry.get_password().is_ok_and(|k| !k.is_empty())
    {
        return Some("keyring".into());
    }
    if std::env::var(ENV_API_KEY).is_ok_and(|k| !k.is_empty()) {
        return Some("env".into());
    }
    if load_file().is_some() {
        return Some("file".into());
    }
    None
}

/// Mask an API key for display: first 8 characters plus an ellipsis.
#[must_use]
pub fn mask(api_key: &str) -> String {
    if api_key.chars().count() <= 8 {
        return "********".to_string();
    }
    let prefix: String = api_key.chars().take(8).collect();
    format!("{prefix}…")
}

// --- Private file helpers ---

fn credentials_path() -> Result<PathBuf, AuthError> {
    dirs::config_dir()
        .map(|c| c.join("prism").join(CREDENTIALS_FILE_NAME))
        .ok_or_else(|| {
            AuthError::StoreError("config directory not found — cannot store credentials".into())
        })
}

fn store_file(api_key: &str) -> Result<(), AuthError> {
    let path = credentials_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::StoreError(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(&path, api_key)
        .map_err(|e| AuthError::StoreError(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::StoreError(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

fn load_file() -> Option<String> {
    let path = credentials_path().ok()?;
    fs::read_to_string(&path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn credentials_path_is_under_config_dir() {
        let path = credentials_path().expect("should resolve");
        assert!(path.ends_with("prism/credentials"));
    }

    #[test]
    fn file_store_load_delete_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");

        std::fs::write(&creds_path, "pk-live-abc123def456\n").expect("write");
        let content = std::fs::read_to_string(&creds_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        assert_eq!(content.as_deref(), Some("pk-live-abc123def456"));

        std::fs::remove_file(&creds_path).expect("delete");
        assert!(!creds_path.exists());
    }

    #[test]
    fn load_file_ignores_empty_content() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let creds_path = tmp.path().join("credentials");

        std::fs::write(&creds_path, "   \n  ").expect("write");
        let content = std::fs::read_to_string(&creds_path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        assert!(content.is_none(), "whitespace-only should return None");
    }

    #[test]
    fn mask_hides_short_keys_entirely() {
        assert_eq!(mask("short"), "********");
        assert_eq!(mask("pk-live-abc123def456"), "pk-live-…");
    }
}

//! Auth token storage.
//!
//! The token is kept under two keys: `adminToken` (current) and `token`
//! (legacy). Both are written on login and both are removed on logout.
//! Reads prefer the current key and fall back to the legacy one so sessions
//! written by older dashboard builds keep working.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current storage key.
pub const TOKEN_KEY: &str = "adminToken";

/// Legacy storage key, kept in sync for backward compatibility.
pub const LEGACY_TOKEN_KEY: &str = "token";

/// Errors that can occur when reading or writing the token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid session document.
    #[error("corrupt session file: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A writer panicked while holding the lock.
    #[error("token store lock poisoned")]
    Poisoned,
}

/// Source of the bearer token attached to outgoing requests.
///
/// Implementations must be cheap to call; `get` runs on every request.
pub trait TokenStore: Send + Sync {
    /// Current token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self) -> Result<Option<SecretString>, TokenStoreError>;

    /// Store a token under both keys, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, token: &SecretString) -> Result<(), TokenStoreError>;

    /// Remove the token from both keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// The two token slots as they are persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct TokenSlots {
    #[serde(rename = "adminToken", default, skip_serializing_if = "Option::is_none")]
    admin_token: Option<String>,
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
}

impl TokenSlots {
    fn both(token: &SecretString) -> Self {
        let value = token.expose_secret().to_owned();
        Self {
            admin_token: Some(value.clone()),
            token: Some(value),
        }
    }

    fn resolve(&self) -> Option<SecretString> {
        self.admin_token
            .as_deref()
            .or(self.token.as_deref())
            .filter(|t| !t.is_empty())
            .map(SecretString::from)
    }
}

/// In-process token store.
///
/// Each instance is an independent session, so tests and embedded callers
/// can run several clients side by side without sharing a token.
#[derive(Default)]
pub struct MemoryTokenStore {
    slots: RwLock<TokenSlots>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token under both keys.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let token = SecretString::from(token.into());
        Self {
            slots: RwLock::new(TokenSlots::both(&token)),
        }
    }

    /// Create a store that only holds a token under the legacy key.
    #[must_use]
    pub fn with_legacy_token(token: impl Into<String>) -> Self {
        Self {
            slots: RwLock::new(TokenSlots {
                admin_token: None,
                token: Some(token.into()),
            }),
        }
    }
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Result<Option<SecretString>, TokenStoreError> {
        let slots = self.slots.read().map_err(|_| TokenStoreError::Poisoned)?;
        Ok(slots.resolve())
    }

    fn set(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        let mut slots = self.slots.write().map_err(|_| TokenStoreError::Poisoned)?;
        *slots = TokenSlots::both(token);
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slots = self.slots.write().map_err(|_| TokenStoreError::Poisoned)?;
        *slots = TokenSlots::default();
        Ok(())
    }
}

/// Token store persisted as a small JSON document on disk.
///
/// Used by the CLI so a login survives between invocations. The file is read
/// once, on the first `get`, and the slots are then served from memory; `set`
/// and `clear` update both. No file I/O happens per request after the first,
/// but a login made by another process after that point is not picked up.
pub struct FileTokenStore {
    path: PathBuf,
    cached: RwLock<Option<TokenSlots>>,
}

impl FileTokenStore {
    /// Create a store backed by `path`. The file is created on first `set`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: RwLock::new(None),
        }
    }

    /// Location of the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<TokenSlots, TokenStoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(TokenSlots::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(TokenSlots::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_slots(&self, slots: &TokenSlots) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(slots)?;
        write_private(&self.path, &bytes)?;
        Ok(())
    }

    fn remember(&self, slots: TokenSlots) -> Result<(), TokenStoreError> {
        let mut cached = self.cached.write().map_err(|_| TokenStoreError::Poisoned)?;
        *cached = Some(slots);
        Ok(())
    }
}

impl std::fmt::Debug for FileTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTokenStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Result<Option<SecretString>, TokenStoreError> {
        {
            let cached = self.cached.read().map_err(|_| TokenStoreError::Poisoned)?;
            if let Some(slots) = cached.as_ref() {
                return Ok(slots.resolve());
            }
        }

        let slots = self.read_slots()?;
        let token = slots.resolve();
        self.remember(slots)?;
        Ok(token)
    }

    fn set(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        let slots = TokenSlots::both(token);
        self.write_slots(&slots)?;
        self.remember(slots)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            // Already logged out, idempotent
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        self.remember(TokenSlots::default())
    }
}

/// Write `bytes` to `path`, readable by the owner only.
///
/// A new file is created with mode 0600; an existing file is narrowed to
/// 0600 before the new contents go in.
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(bytes)?;
    file.flush()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_session_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("murti-test-{}", uuid::Uuid::new_v4()))
            .join("session.json")
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = MemoryTokenStore::new();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_set_and_clear() {
        let store = MemoryTokenStore::new();
        store.set(&SecretString::from("abc")).unwrap();
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "abc");

        store.clear().unwrap();
        assert!(store.get().unwrap().is_none());
    }

    #[test]
    fn test_memory_store_legacy_fallback() {
        let store = MemoryTokenStore::with_legacy_token("legacy");
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "legacy");
    }

    #[test]
    fn test_primary_key_wins_over_legacy() {
        let slots = TokenSlots {
            admin_token: Some("new".to_string()),
            token: Some("old".to_string()),
        };
        assert_eq!(slots.resolve().unwrap().expose_secret(), "new");
    }

    #[test]
    fn test_empty_token_is_absent() {
        let slots = TokenSlots {
            admin_token: Some(String::new()),
            token: None,
        };
        assert!(slots.resolve().is_none());
    }

    #[test]
    fn test_memory_stores_are_independent() {
        let a = MemoryTokenStore::with_token("a");
        let b = MemoryTokenStore::new();
        a.clear().unwrap();
        b.set(&SecretString::from("b")).unwrap();
        assert!(a.get().unwrap().is_none());
        assert_eq!(b.get().unwrap().unwrap().expose_secret(), "b");
    }

    #[test]
    fn test_memory_store_debug_redacts_token() {
        let store = MemoryTokenStore::with_token("super-secret");
        let debug = format!("{store:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_file_store_round_trip_writes_both_keys() {
        let path = temp_session_path();
        let store = FileTokenStore::new(&path);
        assert!(store.get().unwrap().is_none());

        store.set(&SecretString::from("jwt-value")).unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["adminToken"], "jwt-value");
        assert_eq!(raw["token"], "jwt-value");
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "jwt-value");

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().unwrap().is_none());

        // Clearing twice is fine
        store.clear().unwrap();
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_reads_legacy_only_file() {
        let path = temp_session_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"token":"from-old-build"}"#).unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "from-old-build");
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_serves_token_from_memory_after_first_read() {
        let path = temp_session_path();
        let store = FileTokenStore::new(&path);
        store.set(&SecretString::from("cached")).unwrap();

        std::fs::remove_file(&path).unwrap();
        assert_eq!(store.get().unwrap().unwrap().expose_secret(), "cached");

        let reopened = FileTokenStore::new(&path);
        assert!(reopened.get().unwrap().is_none());
        std::fs::write(&path, r#"{"adminToken":"late"}"#).unwrap();
        assert!(reopened.get().unwrap().is_none());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_debug_redacts_token() {
        let path = temp_session_path();
        let store = FileTokenStore::new(&path);
        store.set(&SecretString::from("super-secret")).unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("session.json"));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let path = temp_session_path();
        let store = FileTokenStore::new(&path);
        store.set(&SecretString::from("fresh")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        // A pre-existing world-readable file is narrowed before rewriting
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        store.set(&SecretString::from("rotated")).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let path = temp_session_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(matches!(store.get(), Err(TokenStoreError::Corrupt(_))));
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}

//! Durable client-side key-value storage.
//!
//! Persists the access/refresh token pair, the cached user profile, and the
//! theme preference across sessions. Each value lives under its own
//! namespaced key, serialized as text. [`FileStore`] is the default backend;
//! [`MemoryStore`] gives tests isolated state.

pub mod file;
pub mod memory;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::error::StorageError;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Namespaced storage keys.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "safedeal_access_token";
    pub const REFRESH_TOKEN: &str = "safedeal_refresh_token";
    pub const USER: &str = "safedeal_user";
    pub const THEME: &str = "safedeal_theme";
}

/// Durable text-valued key-value storage.
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Typed accessors over a [`Storage`] backend.
///
/// The token pair is written and cleared only as a pair — no partial
/// credential state is persisted intentionally.
#[derive(Clone)]
pub struct AuthStorage {
    inner: Arc<dyn Storage>,
}

impl AuthStorage {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { inner: store }
    }

    /// Persist a fresh access/refresh token pair.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), StorageError> {
        self.inner.set(keys::ACCESS_TOKEN, access_token)?;
        self.inner.set(keys::REFRESH_TOKEN, refresh_token)?;
        Ok(())
    }

    pub fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.inner.get(keys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.inner.get(keys::REFRESH_TOKEN)
    }

    /// Whether a persisted credential exists.
    pub fn has_credentials(&self) -> bool {
        matches!(self.access_token(), Ok(Some(_)))
    }

    /// Cache the last-known user profile.
    pub fn set_user(&self, user: &User) -> Result<(), StorageError> {
        let json = serde_json::to_string(user)?;
        self.inner.set(keys::USER, &json)
    }

    /// The cached user profile, if any. A corrupt cached value is treated as
    /// absent rather than an error.
    pub fn user(&self) -> Result<Option<User>, StorageError> {
        let Some(json) = self.inner.get(keys::USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding corrupt cached user profile");
                Ok(None)
            }
        }
    }

    /// Remove tokens and the cached user in one sweep.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.inner.remove(keys::ACCESS_TOKEN)?;
        self.inner.remove(keys::REFRESH_TOKEN)?;
        self.inner.remove(keys::USER)?;
        Ok(())
    }

    pub fn theme(&self) -> Result<ThemeMode, StorageError> {
        let stored = self.inner.get(keys::THEME)?;
        Ok(stored
            .as_deref()
            .and_then(ThemeMode::from_str)
            .unwrap_or_default())
    }

    pub fn set_theme(&self, theme: ThemeMode) -> Result<(), StorageError> {
        self.inner.set(keys::THEME, theme.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            first_name: "Abel".to_string(),
            last_name: "Tesfaye".to_string(),
            email: "abel@example.com".to_string(),
            activated: true,
            version: 1,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_token_pair_round_trip() {
        let storage = AuthStorage::new(Arc::new(MemoryStore::new()));

        assert!(!storage.has_credentials());
        storage.set_tokens("access-1", "refresh-1").unwrap();
        assert_eq!(storage.access_token().unwrap().as_deref(), Some("access-1"));
        assert_eq!(storage.refresh_token().unwrap().as_deref(), Some("refresh-1"));
        assert!(storage.has_credentials());

        storage.clear().unwrap();
        assert_eq!(storage.access_token().unwrap(), None);
        assert_eq!(storage.refresh_token().unwrap(), None);
        assert!(!storage.has_credentials());
    }

    #[test]
    fn test_user_round_trip_and_corrupt_value() {
        let store = Arc::new(MemoryStore::new());
        let storage = AuthStorage::new(store.clone());

        assert!(storage.user().unwrap().is_none());
        storage.set_user(&sample_user()).unwrap();
        let restored = storage.user().unwrap().unwrap();
        assert_eq!(restored.email, "abel@example.com");

        store.set(keys::USER, "{not json").unwrap();
        assert!(storage.user().unwrap().is_none());
    }

    #[test]
    fn test_theme_defaults_to_system() {
        let storage = AuthStorage::new(Arc::new(MemoryStore::new()));
        assert_eq!(storage.theme().unwrap(), ThemeMode::System);

        storage.set_theme(ThemeMode::Dark).unwrap();
        assert_eq!(storage.theme().unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn test_theme_mode_strings() {
        assert_eq!(ThemeMode::from_str("dark"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::from_str("sepia"), None);
        assert_eq!(ThemeMode::Light.to_string(), "light");
    }
}

use chrono::Utc;

use crate::core::errors::{CdnwatchError, Result};
use crate::core::models::credential::{CredentialRecord, CredentialUpdate};
use crate::core::traits::key_store::KeyStore;

/// Manages stored API keys through a `KeyStore` backend.
pub struct KeyService<K: KeyStore> {
    pub store: K,
}

impl<K: KeyStore> KeyService<K> {
    /// Store a new key. Name and key are trimmed and must be non-empty.
    pub fn add_key(&self, name: &str, api_key: &str) -> Result<CredentialRecord> {
        let name = require_non_empty(name, "account name")?;
        let api_key = require_non_empty(api_key, "API key")?;
        self.store.add(name, api_key)
    }

    /// List all stored keys.
    pub fn list_keys(&self) -> Result<Vec<CredentialRecord>> {
        self.store.list()
    }

    /// Fetch a key, failing when the id is unknown.
    pub fn get_key(&self, id: &str) -> Result<CredentialRecord> {
        self.store
            .get(id)?
            .ok_or_else(|| CdnwatchError::CredentialNotFound { id: id.to_string() })
    }

    /// Apply an edit and stamp `updatedAt`.
    pub fn update_key(&self, id: &str, update: CredentialUpdate) -> Result<CredentialRecord> {
        let update = CredentialUpdate {
            name: update
                .name
                .as_deref()
                .map(|n| require_non_empty(n, "account name").map(str::to_string))
                .transpose()?,
            api_key: update
                .api_key
                .as_deref()
                .map(|k| require_non_empty(k, "API key").map(str::to_string))
                .transpose()?,
            updated_at: Some(Utc::now()),
            ..update
        };

        self.store
            .update(id, &update)?
            .ok_or_else(|| CdnwatchError::CredentialNotFound { id: id.to_string() })
    }

    /// Flip the active flag of a key.
    pub fn toggle_active(&self, id: &str) -> Result<CredentialRecord> {
        let current = self.get_key(id)?;
        let update = CredentialUpdate {
            is_active: Some(!current.is_active),
            ..Default::default()
        };
        self.store
            .update(id, &update)?
            .ok_or_else(|| CdnwatchError::CredentialNotFound { id: id.to_string() })
    }

    /// Remove a key. Returns whether anything was removed.
    pub fn remove_key(&self, id: &str) -> Result<bool> {
        let existed = self.store.get(id)?.is_some();
        self.store.delete(id)?;
        Ok(existed)
    }
}

/// Trim `value`, failing when nothing is left.
pub fn require_non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CdnwatchError::InvalidInput {
            detail: format!("{what} must not be empty"),
        });
    }
    Ok(trimmed)
}

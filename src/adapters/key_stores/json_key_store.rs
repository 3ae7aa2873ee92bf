use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::core::errors::{CdnwatchError, Result};
use crate::core::models::credential::{CredentialRecord, CredentialUpdate};
use crate::core::traits::key_store::{KeyStore, next_free_id};

/// File name of the key list inside the data directory.
pub const KEYS_FILE: &str = "gcore_api_keys.json";

/// File-based key store that persists records as one JSON array.
///
/// Example `gcore_api_keys.json`:
/// ```text
/// [
///   {
///     "id": "1790856000000",
///     "name": "Production",
///     "apiKey": "1234$abcd...",
///     "createdAt": "2026-10-01T12:00:00Z",
///     "isActive": true
///   }
/// ]
/// ```
///
/// Every operation re-reads the file, so edits made by another process
/// are picked up, and the last writer wins.
#[derive(Clone)]
pub struct JsonKeyStore {
    path: PathBuf,
}

impl JsonKeyStore {
    /// Create a key store backed by the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the well-known location inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(KEYS_FILE))
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, records: &[CredentialRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(records).map_err(|e| CdnwatchError::StoreError {
            path: self.path.clone(),
            detail: format!("failed to serialize keys: {e}"),
        })?;
        std::fs::write(&self.path, json + "\n")?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "saved key store");
        Ok(())
    }
}

impl KeyStore for JsonKeyStore {
    fn add(&self, name: &str, api_key: &str) -> Result<CredentialRecord> {
        let mut existing = self.list()?;
        let now = Utc::now();

        let mut record = CredentialRecord::new(name, api_key, now);
        record.id = next_free_id(&existing, now.timestamp_millis());

        existing.push(record.clone());
        self.save(&existing)?;
        Ok(record)
    }

    fn list(&self) -> Result<Vec<CredentialRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| CdnwatchError::StoreError {
            path: self.path.clone(),
            detail: e.to_string(),
        })
    }

    fn update(&self, id: &str, update: &CredentialUpdate) -> Result<Option<CredentialRecord>> {
        let mut existing = self.list()?;

        let Some(record) = existing.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        record.apply(update);
        let updated = record.clone();

        self.save(&existing)?;
        Ok(Some(updated))
    }

    fn delete(&self, id: &str) -> Result<()> {
        let existing = self.list()?;
        if !existing.iter().any(|r| r.id == id) {
            return Ok(());
        }

        let filtered: Vec<_> = existing.into_iter().filter(|r| r.id != id).collect();
        self.save(&filtered)
    }
}

use crate::core::errors::Result;
use crate::core::models::credential::{CredentialRecord, CredentialUpdate};

/// Port for persisting credential records.
///
/// Implementations keep records in insertion order and never validate key
/// material. Writers are not coordinated; the last write wins.
pub trait KeyStore: Send + Sync {
    /// Create and persist a record with a fresh unique id.
    fn add(&self, name: &str, api_key: &str) -> Result<CredentialRecord>;

    /// List all records in storage order.
    fn list(&self) -> Result<Vec<CredentialRecord>>;

    /// Merge `update` into the record with `id`. Returns `None` without
    /// writing anything when the id is unknown.
    fn update(&self, id: &str, update: &CredentialUpdate) -> Result<Option<CredentialRecord>>;

    /// Remove the record with `id`. Unknown ids are a no-op.
    fn delete(&self, id: &str) -> Result<()>;

    /// Look up a single record.
    fn get(&self, id: &str) -> Result<Option<CredentialRecord>> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }
}

/// Pick an id for a record created at `now_millis` that is not already used
/// by `existing`. Ids are time-derived, so two adds in the same millisecond
/// would otherwise collide.
pub fn next_free_id(existing: &[CredentialRecord], now_millis: i64) -> String {
    let mut candidate = now_millis;
    while existing.iter().any(|r| r.id == candidate.to_string()) {
        candidate += 1;
    }
    candidate.to_string()
}

use std::sync::Mutex;

use chrono::Utc;

use crate::core::errors::Result;
use crate::core::models::credential::{CredentialRecord, CredentialUpdate};
use crate::core::traits::key_store::{KeyStore, next_free_id};

/// In-memory key store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryKeyStore {
    records: Mutex<Vec<CredentialRecord>>,
}

impl MemoryKeyStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CredentialRecord>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyStore for MemoryKeyStore {
    fn add(&self, name: &str, api_key: &str) -> Result<CredentialRecord> {
        let mut records = self.lock();
        let now = Utc::now();

        let mut record = CredentialRecord::new(name, api_key, now);
        record.id = next_free_id(&records, now.timestamp_millis());
        records.push(record.clone());
        Ok(record)
    }

    fn list(&self) -> Result<Vec<CredentialRecord>> {
        Ok(self.lock().clone())
    }

    fn update(&self, id: &str, update: &CredentialUpdate) -> Result<Option<CredentialRecord>> {
        let mut records = self.lock();
        Ok(records.iter_mut().find(|r| r.id == id).map(|record| {
            record.apply(update);
            record.clone()
        }))
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.lock().retain(|r| r.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_list_has_exactly_one_new_active_record() {
        let store = MemoryKeyStore::default();
        let before = store.list().unwrap();

        let added = store.add("Production", "secret").unwrap();
        let after = store.list().unwrap();

        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(after.iter().filter(|r| r.id == added.id).count(), 1);
        assert!(before.iter().all(|r| r.id != added.id));
        assert!(added.is_active);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let store = MemoryKeyStore::default();
        store.add("A", "k").unwrap();
        let before = store.list().unwrap();

        store.delete("nope").unwrap();
        assert_eq!(store.list().unwrap(), before);
    }

    #[test]
    fn get_by_id() {
        let store = MemoryKeyStore::default();
        let a = store.add("A", "k").unwrap();

        assert_eq!(store.get(&a.id).unwrap(), Some(a));
        assert_eq!(store.get("nope").unwrap(), None);
    }
}

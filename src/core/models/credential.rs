use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored, named API key used to authenticate against the statistics API.
///
/// Serialized with camelCase field names; the key file is a JSON array of
/// these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub name: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CredentialRecord {
    /// Build a fresh record. The id is the creation time in milliseconds.
    pub fn new(name: &str, api_key: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: now.timestamp_millis().to_string(),
            name: name.to_string(),
            api_key: api_key.to_string(),
            created_at: now,
            updated_at: None,
            is_active: true,
        }
    }

    /// Merge the set fields of `update` into this record.
    pub fn apply(&mut self, update: &CredentialUpdate) {
        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(api_key) = &update.api_key {
            self.api_key = api_key.clone();
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        if let Some(updated_at) = update.updated_at {
            self.updated_at = Some(updated_at);
        }
    }
}

/// Partial update merged into an existing record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CredentialUpdate {
    pub name: Option<String>,
    pub api_key: Option<String>,
    pub is_active: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CredentialUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.api_key.is_none() && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn serializes_with_camel_case_fields() {
        let now = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        let record = CredentialRecord::new("Production", "secret", now);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], "1790856000000");
        assert_eq!(json["apiKey"], "secret");
        assert_eq!(json["isActive"], true);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_none());
    }

    #[test]
    fn reads_record_written_by_older_versions() {
        let json = r#"{
            "id": "1717000000000",
            "name": "Legacy",
            "apiKey": "abc",
            "createdAt": "2024-05-29T16:26:40.000Z"
        }"#;
        let record: CredentialRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_active);
        assert!(record.updated_at.is_none());
    }

    #[test]
    fn apply_merges_only_set_fields() {
        let now = Utc::now();
        let mut record = CredentialRecord::new("Old", "key-1", now);
        record.apply(&CredentialUpdate {
            is_active: Some(false),
            ..Default::default()
        });

        assert_eq!(record.name, "Old");
        assert_eq!(record.api_key, "key-1");
        assert!(!record.is_active);
    }
}

use tokio::runtime::Runtime;

use crate::adapters::gcore::gcore_client::{GcoreClient, build_http_client};
use crate::adapters::key_stores::json_key_store::JsonKeyStore;
use crate::config::app_config::{AppConfig, ApiSection};
use crate::core::errors::{CdnwatchError, Result};
use crate::core::models::credential::CredentialRecord;
use crate::core::services::key_service::KeyService;

/// Key service over the JSON file in the data directory.
pub fn key_service() -> KeyService<JsonKeyStore> {
    KeyService {
        store: JsonKeyStore::in_dir(crate::cli::context::data_dir()),
    }
}

/// Single-threaded runtime: every request is driven cooperatively from
/// the calling thread.
pub fn runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CdnwatchError::InvalidConfig {
            detail: format!("Failed to create async runtime: {e}"),
        })
}

/// Loaded API settings plus one shared HTTP client.
pub struct ApiContext {
    http: reqwest::Client,
    settings: ApiSection,
}

impl ApiContext {
    pub fn load() -> Result<Self> {
        let config = AppConfig::load(crate::cli::context::data_dir())?;
        let http = build_http_client(&config.api)?;
        Ok(Self {
            http,
            settings: config.api,
        })
    }

    pub fn client(&self, api_key: &str) -> GcoreClient {
        GcoreClient::new(self.http.clone(), api_key, &self.settings)
    }

    pub fn client_for(&self, record: &CredentialRecord) -> GcoreClient {
        self.client(&record.api_key)
    }
}

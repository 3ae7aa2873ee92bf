pub mod key_store;
pub mod stats_api;

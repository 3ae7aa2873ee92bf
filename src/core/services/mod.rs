pub mod account_aggregator;
pub mod formatters;
pub mod key_service;

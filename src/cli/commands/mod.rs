pub mod account;
pub mod api_helpers;
pub mod dashboard;
pub mod keys;
pub mod traffic;

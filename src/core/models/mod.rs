pub mod account_summary;
pub mod connection_check;
pub mod credential;
pub mod traffic;

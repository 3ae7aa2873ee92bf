pub mod gcore;
pub mod key_stores;

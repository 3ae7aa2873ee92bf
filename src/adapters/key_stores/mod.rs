pub mod json_key_store;
#[cfg(test)]
pub mod memory_key_store;

pub mod gcore_client;

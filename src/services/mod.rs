pub mod database;
#[cfg(test)]
pub mod memory;
pub mod store;
pub mod user_service;

pub mod config;
pub mod error;
pub mod handlers;
pub mod record;
pub mod stats;
pub mod store;

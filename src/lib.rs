pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod filter;
pub mod fixtures;
pub mod models;
pub mod observability;
pub mod state;
pub mod store;

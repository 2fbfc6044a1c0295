// src/lib.rs

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod quiz;
pub mod routes;
pub mod sessions;
pub mod state;
pub mod store;

// Re-export specific items for convenience if needed
pub use routes::create_router;

//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Persistence: SQLite adapter for aggregate storage
//! - HTTP: REST API routes
//! - Assets: Filesystem storage for uploaded avatars
//! - Config: Application configuration
//! - State: Shared application state

pub mod assets;
pub mod config;
pub mod http;
pub mod persistence;
pub mod state;

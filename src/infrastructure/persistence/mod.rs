//! SQLite persistence adapters
//!
//! One aggregate, one table: a character row carries its embedded
//! attribute and inventory lists as JSON text columns, so every mutation
//! persists the whole aggregate in a single statement.

mod character_repository;
mod connection;

pub use character_repository::SqliteCharacterRepository;
pub use connection::Database;

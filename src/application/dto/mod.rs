//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so the HTTP adapter can
//! serialize/deserialize without pulling wire names into the domain model.

pub mod character;

pub use character::*;

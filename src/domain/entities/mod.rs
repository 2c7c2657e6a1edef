//! Domain entities - Core business objects with identity

mod character;

pub use character::{Attribute, Character, Item, NO_AVATAR};

//! Application services

mod character_service;

pub use character_service::{
    AttributePayload, CharacterService, CharacterServiceImpl, CreateCharacterRequest, ItemPayload,
    UpdateCharacterRequest,
};

//! Character Service - Application service for character sheets
//!
//! This service provides the use case implementations for managing
//! character aggregates: top-level CRUD, the embedded attribute and
//! inventory lists, and the avatar upload side channel. Every mutation
//! persists the whole aggregate and hands it back, so callers always hold
//! the latest state.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::domain::entities::{Attribute, Character, Item, NO_AVATAR};
use crate::domain::error::DomainError;
use crate::domain::value_objects::{AttributeId, CharacterId, ItemId};
use crate::infrastructure::assets::{AvatarStore, UploadedAvatar};
use crate::infrastructure::persistence::SqliteCharacterRepository;

/// Request to create a new character
#[derive(Debug, Clone)]
pub struct CreateCharacterRequest {
    pub name: String,
    pub description: String,
    pub avatar: Option<UploadedAvatar>,
}

/// Request to update an existing character; absent fields stay untouched
#[derive(Debug, Clone, Default)]
pub struct UpdateCharacterRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<UploadedAvatar>,
}

/// Payload for adding or editing an attribute
#[derive(Debug, Clone)]
pub struct AttributePayload {
    pub name: String,
    pub value: String,
    pub maxvalue: Option<f64>,
}

/// Payload for adding or editing an inventory item
#[derive(Debug, Clone)]
pub struct ItemPayload {
    pub name: String,
    pub description: Option<String>,
}

/// Character service trait defining the application use cases
#[async_trait]
pub trait CharacterService: Send + Sync {
    /// List every character, in creation order
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError>;

    /// Get a character by ID
    async fn get_character(&self, id: CharacterId) -> Result<Character, DomainError>;

    /// Create a new character, storing the avatar first when one was sent
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<Character, DomainError>;

    /// Partially update a character's info, replacing the avatar on upload
    async fn update_character(
        &self,
        id: CharacterId,
        request: UpdateCharacterRequest,
    ) -> Result<Character, DomainError>;

    /// Delete a character and clean up its avatar file
    async fn delete_character(&self, id: CharacterId) -> Result<(), DomainError>;

    /// Append a new attribute with a fresh id
    async fn add_attribute(
        &self,
        id: CharacterId,
        payload: AttributePayload,
    ) -> Result<Character, DomainError>;

    /// Edit an attribute in place, keeping its id and position
    async fn update_attribute(
        &self,
        id: CharacterId,
        attribute_id: AttributeId,
        payload: AttributePayload,
    ) -> Result<Character, DomainError>;

    /// Remove exactly one attribute
    async fn remove_attribute(
        &self,
        id: CharacterId,
        attribute_id: AttributeId,
    ) -> Result<Character, DomainError>;

    /// Append a new inventory item with a fresh id
    async fn add_item(
        &self,
        id: CharacterId,
        payload: ItemPayload,
    ) -> Result<Character, DomainError>;

    /// Edit an item in place, keeping its id and position
    async fn update_item(
        &self,
        id: CharacterId,
        item_id: ItemId,
        payload: ItemPayload,
    ) -> Result<Character, DomainError>;

    /// Remove exactly one item
    async fn remove_item(
        &self,
        id: CharacterId,
        item_id: ItemId,
    ) -> Result<Character, DomainError>;
}

/// Default implementation backed by the SQLite repository and the
/// filesystem avatar store
pub struct CharacterServiceImpl {
    repository: SqliteCharacterRepository,
    avatars: AvatarStore,
}

impl CharacterServiceImpl {
    pub fn new(repository: SqliteCharacterRepository, avatars: AvatarStore) -> Self {
        Self { repository, avatars }
    }

    async fn fetch(&self, id: CharacterId) -> Result<Character, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Character", id))
    }
}

#[async_trait]
impl CharacterService for CharacterServiceImpl {
    #[instrument(skip(self))]
    async fn list_characters(&self) -> Result<Vec<Character>, DomainError> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    async fn get_character(&self, id: CharacterId) -> Result<Character, DomainError> {
        debug!(character_id = %id, "Fetching character");
        self.fetch(id).await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create_character(
        &self,
        request: CreateCharacterRequest,
    ) -> Result<Character, DomainError> {
        // Upload validation runs inside the store, before anything is written
        let avatar = match &request.avatar {
            Some(upload) => self.avatars.store(upload).await?,
            None => NO_AVATAR.to_string(),
        };

        let character = Character::new(request.name, request.description, avatar);
        self.repository.insert(&character).await?;

        info!(character_id = %character.id, "Created character: {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self, request), fields(character_id = %id))]
    async fn update_character(
        &self,
        id: CharacterId,
        request: UpdateCharacterRequest,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;
        let previous_avatar = character.avatar.clone();

        if let Some(name) = request.name {
            character.name = name;
        }
        if let Some(description) = request.description {
            character.description = description;
        }
        let avatar_replaced = match &request.avatar {
            Some(upload) => {
                character.avatar = self.avatars.store(upload).await?;
                true
            }
            None => false,
        };

        self.repository.update(&character).await?;

        if avatar_replaced {
            self.avatars.delete_quiet(&previous_avatar).await;
        }

        info!(character_id = %id, "Updated character: {}", character.name);
        Ok(character)
    }

    #[instrument(skip(self))]
    async fn delete_character(&self, id: CharacterId) -> Result<(), DomainError> {
        let character = self.fetch(id).await?;

        self.repository.delete(id).await?;
        self.avatars.delete_quiet(&character.avatar).await;

        info!(character_id = %id, "Deleted character: {}", character.name);
        Ok(())
    }

    #[instrument(skip(self, payload), fields(character_id = %id))]
    async fn add_attribute(
        &self,
        id: CharacterId,
        payload: AttributePayload,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        let attribute_id = character.add_attribute(Attribute::new(
            payload.name,
            payload.value,
            payload.maxvalue,
        ));
        self.repository.update(&character).await?;

        debug!(character_id = %id, attribute_id = %attribute_id, "Added attribute");
        Ok(character)
    }

    #[instrument(skip(self, payload), fields(character_id = %id, attribute_id = %attribute_id))]
    async fn update_attribute(
        &self,
        id: CharacterId,
        attribute_id: AttributeId,
        payload: AttributePayload,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        if !character.update_attribute(
            attribute_id,
            payload.name,
            payload.value,
            payload.maxvalue,
        ) {
            return Err(DomainError::not_found("Attribute", attribute_id));
        }
        self.repository.update(&character).await?;

        debug!(character_id = %id, attribute_id = %attribute_id, "Updated attribute");
        Ok(character)
    }

    #[instrument(skip(self), fields(character_id = %id, attribute_id = %attribute_id))]
    async fn remove_attribute(
        &self,
        id: CharacterId,
        attribute_id: AttributeId,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        if !character.remove_attribute(attribute_id) {
            return Err(DomainError::not_found("Attribute", attribute_id));
        }
        self.repository.update(&character).await?;

        debug!(character_id = %id, attribute_id = %attribute_id, "Removed attribute");
        Ok(character)
    }

    #[instrument(skip(self, payload), fields(character_id = %id))]
    async fn add_item(
        &self,
        id: CharacterId,
        payload: ItemPayload,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        let item_id = character.add_item(Item::new(payload.name, payload.description));
        self.repository.update(&character).await?;

        debug!(character_id = %id, item_id = %item_id, "Added item");
        Ok(character)
    }

    #[instrument(skip(self, payload), fields(character_id = %id, item_id = %item_id))]
    async fn update_item(
        &self,
        id: CharacterId,
        item_id: ItemId,
        payload: ItemPayload,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        if !character.update_item(item_id, payload.name, payload.description) {
            return Err(DomainError::not_found("Item", item_id));
        }
        self.repository.update(&character).await?;

        debug!(character_id = %id, item_id = %item_id, "Updated item");
        Ok(character)
    }

    #[instrument(skip(self), fields(character_id = %id, item_id = %item_id))]
    async fn remove_item(
        &self,
        id: CharacterId,
        item_id: ItemId,
    ) -> Result<Character, DomainError> {
        let mut character = self.fetch(id).await?;

        if !character.remove_item(item_id) {
            return Err(DomainError::not_found("Item", item_id));
        }
        self.repository.update(&character).await?;

        debug!(character_id = %id, item_id = %item_id, "Removed item");
        Ok(character)
    }
}

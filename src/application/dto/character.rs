//! Character wire-format DTOs
//!
//! The JSON contract predates this server and is kept verbatim for the
//! existing web client: ids serialize as `_id` and the attribute list as
//! `atributes` (the original field spelling).

use serde::{Deserialize, Serialize};

use crate::application::services::{AttributePayload, ItemPayload};
use crate::domain::entities::{Attribute, Character, Item};

#[derive(Debug, Clone, Serialize)]
pub struct CharacterResponseDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub avatar: String,
    #[serde(rename = "atributes")]
    pub attributes: Vec<AttributeResponseDto>,
    pub inventory: Vec<ItemResponseDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttributeResponseDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxvalue: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemResponseDto {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Character> for CharacterResponseDto {
    fn from(character: Character) -> Self {
        Self {
            id: character.id.to_string(),
            name: character.name,
            description: character.description,
            avatar: character.avatar,
            attributes: character
                .attributes
                .into_iter()
                .map(AttributeResponseDto::from)
                .collect(),
            inventory: character
                .inventory
                .into_iter()
                .map(ItemResponseDto::from)
                .collect(),
        }
    }
}

impl From<Attribute> for AttributeResponseDto {
    fn from(attribute: Attribute) -> Self {
        Self {
            id: attribute.id.to_string(),
            name: attribute.name,
            value: attribute.value,
            maxvalue: attribute.maxvalue,
        }
    }
}

impl From<Item> for ItemResponseDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            description: item.description,
        }
    }
}

/// Body for adding or editing an attribute
#[derive(Debug, Clone, Deserialize)]
pub struct AttributeRequestDto {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub maxvalue: Option<f64>,
}

/// Body for adding or editing an inventory item
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRequestDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<AttributeRequestDto> for AttributePayload {
    fn from(dto: AttributeRequestDto) -> Self {
        Self {
            name: dto.name,
            value: dto.value,
            maxvalue: dto.maxvalue,
        }
    }
}

impl From<ItemRequestDto> for ItemPayload {
    fn from(dto: ItemRequestDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
        }
    }
}

/// Success envelope carrying the whole updated aggregate
///
/// Clients replace their local copy with `character` on every write.
#[derive(Debug, Serialize)]
pub struct MutationResponseDto {
    pub result: u8,
    pub character: CharacterResponseDto,
}

impl MutationResponseDto {
    pub fn updated(character: Character) -> Self {
        Self {
            result: 1,
            character: CharacterResponseDto::from(character),
        }
    }
}

/// Success envelope for deletions, which return no aggregate
#[derive(Debug, Serialize)]
pub struct DeleteResponseDto {
    pub result: u8,
}

impl DeleteResponseDto {
    pub fn deleted() -> Self {
        Self { result: 1 }
    }
}

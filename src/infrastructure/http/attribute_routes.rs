//! Attribute API routes
//!
//! The path segment keeps the original `atributes` spelling; it is part of
//! the wire contract with the existing web client.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::application::dto::{AttributeRequestDto, MutationResponseDto};
use crate::application::services::CharacterService;
use crate::domain::value_objects::{AttributeId, CharacterId};
use crate::infrastructure::state::AppState;

use super::error::ApiResult;
use super::parse_id;

/// Add an attribute to a character
pub async fn add_attribute(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AttributeRequestDto>, JsonRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let id: CharacterId = parse_id(&id, "character")?;
    let Json(payload) = payload?;

    let character = state
        .character_service
        .add_attribute(id, payload.into())
        .await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

/// Edit an attribute in place
pub async fn update_attribute(
    State(state): State<Arc<AppState>>,
    Path((character_id, atr_id)): Path<(String, String)>,
    payload: Result<Json<AttributeRequestDto>, JsonRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let character_id: CharacterId = parse_id(&character_id, "character")?;
    let attribute_id: AttributeId = parse_id(&atr_id, "attribute")?;
    let Json(payload) = payload?;

    let character = state
        .character_service
        .update_attribute(character_id, attribute_id, payload.into())
        .await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

/// Delete an attribute
pub async fn delete_attribute(
    State(state): State<Arc<AppState>>,
    Path((character_id, atr_id)): Path<(String, String)>,
) -> ApiResult<Json<MutationResponseDto>> {
    let character_id: CharacterId = parse_id(&character_id, "character")?;
    let attribute_id: AttributeId = parse_id(&atr_id, "attribute")?;

    let character = state
        .character_service
        .remove_attribute(character_id, attribute_id)
        .await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

//! Inventory API routes

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::application::dto::{ItemRequestDto, MutationResponseDto};
use crate::application::services::CharacterService;
use crate::domain::value_objects::{CharacterId, ItemId};
use crate::infrastructure::state::AppState;

use super::error::ApiResult;
use super::parse_id;

/// Add an item to a character's inventory
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<ItemRequestDto>, JsonRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let id: CharacterId = parse_id(&id, "character")?;
    let Json(payload) = payload?;

    let character = state.character_service.add_item(id, payload.into()).await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

/// Edit an item in place
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path((character_id, item_id)): Path<(String, String)>,
    payload: Result<Json<ItemRequestDto>, JsonRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let character_id: CharacterId = parse_id(&character_id, "character")?;
    let item_id: ItemId = parse_id(&item_id, "item")?;
    let Json(payload) = payload?;

    let character = state
        .character_service
        .update_item(character_id, item_id, payload.into())
        .await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

/// Delete an item
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((character_id, item_id)): Path<(String, String)>,
) -> ApiResult<Json<MutationResponseDto>> {
    let character_id: CharacterId = parse_id(&character_id, "character")?;
    let item_id: ItemId = parse_id(&item_id, "item")?;

    let character = state
        .character_service
        .remove_item(character_id, item_id)
        .await?;
    Ok(Json(MutationResponseDto::updated(character)))
}

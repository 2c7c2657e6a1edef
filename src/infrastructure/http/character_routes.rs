//! Character API routes
//!
//! Create and update arrive as multipart forms because the avatar rides
//! along in the `avatar` file field; text fields not present in the form
//! are left untouched on update.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use std::sync::Arc;

use crate::application::dto::{CharacterResponseDto, DeleteResponseDto, MutationResponseDto};
use crate::application::services::{
    CharacterService, CreateCharacterRequest, UpdateCharacterRequest,
};
use crate::domain::value_objects::CharacterId;
use crate::infrastructure::assets::UploadedAvatar;
use crate::infrastructure::state::AppState;

use super::error::ApiResult;
use super::parse_id;

/// Fields accepted by the create and update forms
#[derive(Default)]
struct CharacterForm {
    name: Option<String>,
    description: Option<String>,
    avatar: Option<UploadedAvatar>,
}

async fn read_character_form(mut multipart: Multipart) -> ApiResult<CharacterForm> {
    let mut form = CharacterForm::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => form.name = Some(field.text().await?),
            "description" => form.description = Some(field.text().await?),
            "avatar" => {
                let original_filename = field.file_name().unwrap_or("avatar").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                form.avatar = Some(UploadedAvatar {
                    bytes: field.bytes().await?.to_vec(),
                    original_filename,
                    content_type,
                });
            }
            _ => {}
        }
    }

    Ok(form)
}

/// List all characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<CharacterResponseDto>>> {
    let characters = state.character_service.list_characters().await?;
    Ok(Json(
        characters
            .into_iter()
            .map(CharacterResponseDto::from)
            .collect(),
    ))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CharacterResponseDto>> {
    let id: CharacterId = parse_id(&id, "character")?;
    let character = state.character_service.get_character(id).await?;
    Ok(Json(CharacterResponseDto::from(character)))
}

/// Create a character
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let form = read_character_form(multipart?).await?;

    let request = CreateCharacterRequest {
        name: form.name.unwrap_or_default(),
        description: form.description.unwrap_or_default(),
        avatar: form.avatar,
    };
    let character = state.character_service.create_character(request).await?;

    Ok(Json(MutationResponseDto::updated(character)))
}

/// Update a character's info and, when uploaded, its avatar
pub async fn update_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MutationResponseDto>> {
    let id: CharacterId = parse_id(&id, "character")?;
    let form = read_character_form(multipart?).await?;

    let request = UpdateCharacterRequest {
        name: form.name,
        description: form.description,
        avatar: form.avatar,
    };
    let character = state.character_service.update_character(id, request).await?;

    Ok(Json(MutationResponseDto::updated(character)))
}

/// Delete a character
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponseDto>> {
    let id: CharacterId = parse_id(&id, "character")?;
    state.character_service.delete_character(id).await?;
    Ok(Json(DeleteResponseDto::deleted()))
}

//! Shared application state

use anyhow::Result;

use crate::application::services::CharacterServiceImpl;
use crate::infrastructure::assets::AvatarStore;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::persistence::{Database, SqliteCharacterRepository};

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Database handle, kept for the shutdown path
    pub database: Database,
    pub character_service: CharacterServiceImpl,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let database = Database::connect(&config.database_path).await?;
        let avatars = AvatarStore::new(&config.uploads_dir, config.max_avatar_bytes).await?;

        let repository = SqliteCharacterRepository::new(database.clone());
        let character_service = CharacterServiceImpl::new(repository, avatars);

        Ok(Self {
            config,
            database,
            character_service,
        })
    }
}

//! Character repository backed by SQLite

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::connection::Database;
use crate::domain::entities::Character;
use crate::domain::error::DomainError;
use crate::domain::value_objects::CharacterId;

/// Repository for Character aggregates
///
/// The embedded lists travel with the row as JSON text, so a row write is
/// an atomic save of the whole aggregate. Listing follows rowid, which is
/// insertion order.
#[derive(Clone)]
pub struct SqliteCharacterRepository {
    database: Database,
}

impl SqliteCharacterRepository {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    pub async fn insert(&self, character: &Character) -> Result<(), DomainError> {
        let attributes = serde_json::to_string(&character.attributes)?;
        let inventory = serde_json::to_string(&character.inventory)?;

        sqlx::query(
            "INSERT INTO characters (id, name, description, avatar, attributes, inventory)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(character.id.to_string())
        .bind(&character.name)
        .bind(&character.description)
        .bind(&character.avatar)
        .bind(attributes)
        .bind(inventory)
        .execute(self.database.pool())
        .await?;

        tracing::debug!(character_id = %character.id, "Inserted character row");
        Ok(())
    }

    pub async fn get(&self, id: CharacterId) -> Result<Option<Character>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, description, avatar, attributes, inventory
             FROM characters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.database.pool())
        .await?;

        row.map(row_to_character).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Character>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, description, avatar, attributes, inventory
             FROM characters ORDER BY rowid",
        )
        .fetch_all(self.database.pool())
        .await?;

        rows.into_iter().map(row_to_character).collect()
    }

    /// Persist the full aggregate over the existing row
    pub async fn update(&self, character: &Character) -> Result<(), DomainError> {
        let attributes = serde_json::to_string(&character.attributes)?;
        let inventory = serde_json::to_string(&character.inventory)?;

        let result = sqlx::query(
            "UPDATE characters
             SET name = ?, description = ?, avatar = ?, attributes = ?, inventory = ?
             WHERE id = ?",
        )
        .bind(&character.name)
        .bind(&character.description)
        .bind(&character.avatar)
        .bind(attributes)
        .bind(inventory)
        .bind(character.id.to_string())
        .execute(self.database.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Character", character.id));
        }

        tracing::debug!(character_id = %character.id, "Updated character row");
        Ok(())
    }

    pub async fn delete(&self, id: CharacterId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(self.database.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Character", id));
        }

        tracing::debug!(character_id = %id, "Deleted character row");
        Ok(())
    }
}

fn row_to_character(row: SqliteRow) -> Result<Character, DomainError> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|e| DomainError::Storage(format!("malformed character id {id}: {e}")))?;

    let attributes: String = row.get("attributes");
    let inventory: String = row.get("inventory");

    Ok(Character {
        id: CharacterId::from_uuid(id),
        name: row.get("name"),
        description: row.get("description"),
        avatar: row.get("avatar"),
        attributes: serde_json::from_str(&attributes)?,
        inventory: serde_json::from_str(&inventory)?,
    })
}

use std::sync::Arc;

use crate::errors::{AppError, Result};
use crate::models::{Ground, Month, Player, PlayerRecord, PlayerValue};
use crate::store::{path, DocumentStore, StoredDocument};

/// Direct reads and writes of the ground → month → player hierarchy.
///
/// Holds no view state; selection and local mirroring live in
/// [`RosterSession`](super::session::RosterSession).
#[derive(Clone)]
pub struct RosterService {
    store: Arc<dyn DocumentStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        RosterService { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub async fn list_grounds(&self) -> Result<Vec<Ground>> {
        let documents = self.store.list_collection(&path::grounds()).await?;
        documents.into_iter().map(Ground::from_stored).collect()
    }

    pub async fn get_ground(&self, ground_id: &str) -> Result<Ground> {
        let ground_path = path::ground(require_ground(ground_id)?)?;
        let data = self
            .store
            .get_document(&ground_path)
            .await?
            .ok_or_else(|| AppError::not_found(ground_path))?;
        Ground::from_stored(StoredDocument {
            id: ground_id.to_string(),
            data,
        })
    }

    /// Month labels under a ground.
    pub async fn list_months(&self, ground_id: &str) -> Result<Vec<String>> {
        let months_path = path::months(require_ground(ground_id)?)?;
        let documents = self.store.list_collection(&months_path).await?;
        Ok(documents.into_iter().map(|d| d.id).collect())
    }

    pub async fn list_players(&self, ground_id: &str, label: &str) -> Result<Vec<Player>> {
        let players_path = path::players(require_ground(ground_id)?, require_month(label)?)?;
        let documents = self.store.list_collection(&players_path).await?;
        documents.into_iter().map(Player::from_stored).collect()
    }

    /// Returns `None` without touching the store when `name` is blank.
    pub async fn create_ground(&self, name: &str) -> Result<Option<Ground>> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let id = self
            .store
            .add_document(&path::grounds(), Ground::record(name)?)
            .await?;
        tracing::info!("Created ground {} ({})", id, name);

        Ok(Some(Ground {
            id,
            name: name.to_string(),
        }))
    }

    /// Writes the month keyed by its label, replacing any month with the same
    /// label. Returns `None` without touching the store when `label` is blank.
    pub async fn create_month(&self, ground_id: &str, label: &str) -> Result<Option<Month>> {
        if label.trim().is_empty() {
            return Ok(None);
        }

        let month = Month::now(label);
        let month_path = path::month(require_ground(ground_id)?, label)?;
        self.store.set_document(&month_path, month.record()?).await?;
        tracing::info!("Created month {}", month_path);

        Ok(Some(month))
    }

    /// Creates a blank player; fields are filled in afterwards with single-field updates.
    pub async fn create_player(&self, ground_id: &str, label: &str) -> Result<Player> {
        let players_path = path::players(require_ground(ground_id)?, require_month(label)?)?;
        let record = PlayerRecord::blank();
        let id = self
            .store
            .add_document(&players_path, record.to_document()?)
            .await?;
        tracing::info!("Created player {}/{}", players_path, id);

        Ok(Player { id, record })
    }

    /// Sends exactly one field to the store; other stored fields are untouched.
    pub async fn update_player_field(
        &self,
        ground_id: &str,
        label: &str,
        player_id: &str,
        value: &PlayerValue,
    ) -> Result<()> {
        let player_path = path::player(require_ground(ground_id)?, require_month(label)?, player_id)?;
        self.store
            .update_document(&player_path, value.to_patch())
            .await?;
        tracing::debug!("Updated {} on {}", value.field(), player_path);
        Ok(())
    }

    pub async fn delete_player(&self, ground_id: &str, label: &str, player_id: &str) -> Result<()> {
        let player_path = path::player(require_ground(ground_id)?, require_month(label)?, player_id)?;
        self.store.delete_document(&player_path).await?;
        tracing::info!("Deleted player {}", player_path);
        Ok(())
    }
}

fn require_ground(ground_id: &str) -> Result<&str> {
    if ground_id.is_empty() {
        return Err(AppError::NoGroundSelected);
    }
    Ok(ground_id)
}

fn require_month(label: &str) -> Result<&str> {
    if label.is_empty() {
        return Err(AppError::NoMonthSelected);
    }
    Ok(label)
}

//! Document paths for the roster hierarchy.
//!
//! ```text
//! grounds/{groundId}
//! grounds/{groundId}/months/{monthLabel}
//! grounds/{groundId}/months/{monthLabel}/players/{playerId}
//! ```

use crate::errors::{AppError, Result};

pub const GROUNDS: &str = "grounds";
pub const MONTHS: &str = "months";
pub const PLAYERS: &str = "players";

/// Checks that a value can be used as a single path segment.
pub fn segment(value: &str) -> Result<&str> {
    if value.is_empty() || value.contains('/') {
        return Err(AppError::InvalidPathSegment(value.to_string()));
    }
    Ok(value)
}

pub fn grounds() -> String {
    GROUNDS.to_string()
}

pub fn ground(ground_id: &str) -> Result<String> {
    Ok(format!("{}/{}", GROUNDS, segment(ground_id)?))
}

pub fn months(ground_id: &str) -> Result<String> {
    Ok(format!("{}/{}", ground(ground_id)?, MONTHS))
}

pub fn month(ground_id: &str, label: &str) -> Result<String> {
    Ok(format!("{}/{}", months(ground_id)?, segment(label)?))
}

pub fn players(ground_id: &str, label: &str) -> Result<String> {
    Ok(format!("{}/{}", month(ground_id, label)?, PLAYERS))
}

pub fn player(ground_id: &str, label: &str, player_id: &str) -> Result<String> {
    Ok(format!("{}/{}", players(ground_id, label)?, segment(player_id)?))
}

/// Splits a document path into its parent collection path and document id.
pub fn split(path: &str) -> Result<(&str, &str)> {
    match path.rsplit_once('/') {
        Some((collection, id)) if !collection.is_empty() && !id.is_empty() => Ok((collection, id)),
        _ => Err(AppError::InvalidPathSegment(path.to_string())),
    }
}

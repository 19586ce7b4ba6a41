use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::services::{Notice, RosterView};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroundRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Ground name must be at most 100 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMonthRequest {
    #[serde(default)]
    #[validate(
        length(max = 50, message = "Month label must be at most 50 characters"),
        custom(function = "validate_label")
    )]
    pub label: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectGroundRequest {
    pub ground_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectMonthRequest {
    pub label: String,
}

/// `{"field": "dueFees", "value": 150}`
#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    pub field: String,
    #[serde(default)]
    pub value: Value,
}

/// Result of an add that may be silently skipped for a blank name.
#[derive(Debug, Serialize)]
pub struct CreatedResponse<T> {
    pub created: bool,
    pub item: Option<T>,
}

impl<T> From<Option<T>> for CreatedResponse<T> {
    fn from(item: Option<T>) -> Self {
        CreatedResponse {
            created: item.is_some(),
            item,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub view: RosterView,
    pub notice: Option<Notice>,
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.contains('/') {
        let mut error = ValidationError::new("label_path");
        error.message = Some("Month label must not contain '/'".into());
        return Err(error);
    }
    Ok(())
}

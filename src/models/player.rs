use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use mongodb::bson::{self, Bson, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::store::StoredDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Paid")]
    Paid,
    #[default]
    #[serde(rename = "Not Paid")]
    NotPaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "Not Paid",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "Paid" => Ok(PaymentStatus::Paid),
            "Not Paid" => Ok(PaymentStatus::NotPaid),
            other => Err(AppError::invalid_data(format!(
                "status must be 'Paid' or 'Not Paid', got '{}'",
                other
            ))),
        }
    }
}

/// Stored fields of a player. Missing fields read as their blank value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerRecord {
    pub name: String,
    pub contact: String,
    pub status: PaymentStatus,
    pub due_fees: f64,
    pub due_date: String,
    pub remarks: String,
}

/// Per-month fee record for one roster member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    #[serde(flatten)]
    pub record: PlayerRecord,
}

impl Player {
    pub fn from_stored(stored: StoredDocument) -> Result<Self> {
        Ok(Player {
            id: stored.id,
            record: bson::from_document(stored.data)?,
        })
    }

    /// Mirrors a single-field write onto this player, leaving every other field as is.
    pub fn apply(&mut self, value: &PlayerValue) {
        let record = &mut self.record;
        match value {
            PlayerValue::Name(v) => record.name = v.clone(),
            PlayerValue::Contact(v) => record.contact = v.clone(),
            PlayerValue::Status(v) => record.status = *v,
            PlayerValue::DueFees(v) => record.due_fees = *v,
            PlayerValue::DueDate(v) => record.due_date = v.clone(),
            PlayerValue::Remarks(v) => record.remarks = v.clone(),
        }
    }
}

impl PlayerRecord {
    /// The record every new player starts from; fields are filled in by later edits.
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn to_document(&self) -> Result<Document> {
        Ok(bson::to_document(self)?)
    }
}

/// The editable player attributes, named as they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerField {
    Name,
    Contact,
    Status,
    DueFees,
    DueDate,
    Remarks,
}

impl PlayerField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerField::Name => "name",
            PlayerField::Contact => "contact",
            PlayerField::Status => "status",
            PlayerField::DueFees => "dueFees",
            PlayerField::DueDate => "dueDate",
            PlayerField::Remarks => "remarks",
        }
    }

    /// Converts raw input into a typed value for this field.
    ///
    /// `dueFees` accepts JSON numbers and numeric strings (the empty string
    /// counts as 0) and must be a finite, non-negative amount. `dueDate` is
    /// either empty or a `YYYY-MM-DD` date.
    pub fn coerce(&self, raw: &Value) -> Result<PlayerValue> {
        match self {
            PlayerField::Name => Ok(PlayerValue::Name(text(self, raw)?)),
            PlayerField::Contact => Ok(PlayerValue::Contact(text(self, raw)?)),
            PlayerField::Remarks => Ok(PlayerValue::Remarks(text(self, raw)?)),
            PlayerField::Status => Ok(PlayerValue::Status(text(self, raw)?.parse()?)),
            PlayerField::DueDate => {
                let date = text(self, raw)?;
                if !date.is_empty() && NaiveDate::parse_from_str(&date, "%Y-%m-%d").is_err() {
                    return Err(AppError::invalid_data(format!(
                        "dueDate must be empty or YYYY-MM-DD, got '{}'",
                        date
                    )));
                }
                Ok(PlayerValue::DueDate(date))
            }
            PlayerField::DueFees => Ok(PlayerValue::DueFees(amount(raw)?)),
        }
    }
}

impl FromStr for PlayerField {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "name" => Ok(PlayerField::Name),
            "contact" => Ok(PlayerField::Contact),
            "status" => Ok(PlayerField::Status),
            "dueFees" => Ok(PlayerField::DueFees),
            "dueDate" => Ok(PlayerField::DueDate),
            "remarks" => Ok(PlayerField::Remarks),
            other => Err(AppError::UnknownField(other.to_string())),
        }
    }
}

impl fmt::Display for PlayerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated value for exactly one player field.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerValue {
    Name(String),
    Contact(String),
    Status(PaymentStatus),
    DueFees(f64),
    DueDate(String),
    Remarks(String),
}

impl PlayerValue {
    pub fn field(&self) -> PlayerField {
        match self {
            PlayerValue::Name(_) => PlayerField::Name,
            PlayerValue::Contact(_) => PlayerField::Contact,
            PlayerValue::Status(_) => PlayerField::Status,
            PlayerValue::DueFees(_) => PlayerField::DueFees,
            PlayerValue::DueDate(_) => PlayerField::DueDate,
            PlayerValue::Remarks(_) => PlayerField::Remarks,
        }
    }

    /// The one-field patch sent to the store.
    pub fn to_patch(&self) -> Document {
        let value = match self {
            PlayerValue::Name(v)
            | PlayerValue::Contact(v)
            | PlayerValue::DueDate(v)
            | PlayerValue::Remarks(v) => Bson::String(v.clone()),
            PlayerValue::Status(v) => Bson::String(v.as_str().to_string()),
            PlayerValue::DueFees(v) => Bson::Double(*v),
        };
        let mut patch = Document::new();
        patch.insert(self.field().as_str(), value);
        patch
    }
}

fn text(field: &PlayerField, raw: &Value) -> Result<String> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(AppError::invalid_data(format!("{} must be a string", field))),
    }
}

fn amount(raw: &Value) -> Result<f64> {
    let value = match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| AppError::invalid_data("dueFees is not representable"))?,
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::invalid_data(format!("dueFees must be numeric, got '{}'", s)))?,
        Value::Null => 0.0,
        _ => return Err(AppError::invalid_data("dueFees must be a number")),
    };

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::invalid_data("dueFees must be a non-negative amount"));
    }
    Ok(value)
}

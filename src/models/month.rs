use chrono::{SecondsFormat, Utc};
use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::store::StoredDocument;

/// A fee period under one ground. The id is the human-readable label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Month {
    pub id: String,
    pub created: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MonthRecord {
    #[serde(default)]
    created: String,
}

impl Month {
    /// A month labelled `label`, stamped with the current time.
    pub fn now(label: &str) -> Self {
        Month {
            id: label.to_string(),
            created: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn label(&self) -> &str {
        &self.id
    }

    pub fn from_stored(stored: StoredDocument) -> Result<Self> {
        let record: MonthRecord = bson::from_document(stored.data)?;
        Ok(Month {
            id: stored.id,
            created: record.created,
        })
    }

    pub fn record(&self) -> Result<Document> {
        Ok(bson::to_document(&MonthRecord {
            created: self.created.clone(),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_is_an_iso_timestamp() {
        let month = Month::now("January");
        assert_eq!(month.label(), "January");
        assert!(month.created.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&month.created).is_ok());
    }
}

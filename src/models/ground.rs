use mongodb::bson::{self, Document};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::store::StoredDocument;

/// A venue or branch under which fees are tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ground {
    pub id: String,
    pub name: String,
}

/// Stored shape of a ground: the id lives in the path, not the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GroundRecord {
    #[serde(default)]
    name: String,
}

impl Ground {
    pub fn from_stored(stored: StoredDocument) -> Result<Self> {
        let record: GroundRecord = bson::from_document(stored.data)?;
        Ok(Ground {
            id: stored.id,
            name: record.name,
        })
    }

    pub fn record(name: &str) -> Result<Document> {
        Ok(bson::to_document(&GroundRecord {
            name: name.to_string(),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn missing_name_reads_as_empty() {
        let ground = Ground::from_stored(StoredDocument {
            id: "g1".to_string(),
            data: doc! {},
        })
        .unwrap();
        assert_eq!(ground.name, "");
    }

    #[test]
    fn record_holds_only_the_name() {
        assert_eq!(Ground::record("North Field").unwrap(), doc! { "name": "North Field" });
    }
}

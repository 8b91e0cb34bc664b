use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::gifts::GiftEntity;

/// Derives the catalog key from a display name: lowercase, runs of
/// non-alphanumeric characters collapsed to a single underscore, trimmed.
/// The same name always normalizes to the same key, which is what gives
/// the catalog its upsert-by-key semantics.
pub fn gift_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !key.is_empty() {
                key.push('_');
            }
            pending_separator = false;
            key.push(c);
        } else {
            pending_separator = true;
        }
    }

    key
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpsertGiftModel {
    pub name: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub points: i64,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GiftModel {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub price: i64,
    pub points: i64,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl From<GiftEntity> for GiftModel {
    fn from(entity: GiftEntity) -> Self {
        Self {
            id: entity.id,
            key: entity.key,
            name: entity.name,
            price: entity.price,
            points: entity.points,
            metadata: entity.metadata,
            created_at: entity.created_at,
        }
    }
}

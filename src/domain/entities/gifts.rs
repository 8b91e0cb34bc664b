use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::infrastructure::postgres::schema::gifts;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = gifts)]
pub struct GiftEntity {
    pub id: i64,
    pub key: String,
    pub name: String,
    pub price: i64,
    pub points: i64,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gifts)]
pub struct InsertGiftEntity {
    pub key: String,
    pub name: String,
    pub price: i64,
    pub points: i64,
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use crate::infrastructure::postgres::schema::gift_transactions;

/// Append-only purchase record; never mutated after insert.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = gift_transactions)]
pub struct GiftTransactionEntity {
    pub id: i64,
    pub gift_id: i64,
    pub stream_id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub quantity: i32,
    pub total_price: i64,
    pub granted_points: i64,
    pub message: Option<String>,
    pub transaction_meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gift_transactions)]
pub struct InsertGiftTransactionEntity {
    pub gift_id: i64,
    pub stream_id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub quantity: i32,
    pub total_price: i64,
    pub granted_points: i64,
    pub message: Option<String>,
    pub transaction_meta: Option<Value>,
    pub created_at: DateTime<Utc>,
}

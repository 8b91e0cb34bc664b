use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{gift_transactions::GiftTransactionEntity, gifts::GiftEntity};
use crate::domain::value_objects::gifts::GiftModel;

/// Request body for `POST /streams/:id/gifts`.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseGiftModel {
    pub gift_key: String,
    pub quantity: Option<i32>,
    pub to_user_id: Option<i64>,
    pub message: Option<String>,
    pub transaction_meta: Option<Value>,
}

/// Validated purchase, ready for the transactional store operation.
#[derive(Debug, Clone)]
pub struct PurchaseCommand {
    pub stream_id: i64,
    pub buyer_id: i64,
    pub gift_key: String,
    pub quantity: i32,
    pub recipient_id: Option<i64>,
    pub message: Option<String>,
    pub transaction_meta: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct RecipientProgress {
    pub user_id: i64,
    pub name: String,
    pub level: i32,
    pub points: i64,
    pub levels_gained: i32,
}

/// Everything the committed purchase produced, including the display names
/// the chat announcements need (resolved inside the same transaction).
#[derive(Debug, Clone)]
pub struct PurchaseOutcome {
    pub transaction: GiftTransactionEntity,
    pub gift: GiftEntity,
    pub buyer_name: String,
    pub new_balance: i64,
    pub recipient: RecipientProgress,
}

#[derive(Debug, Clone, Serialize)]
pub struct GiftTransactionModel {
    pub id: i64,
    pub gift_id: i64,
    pub stream_id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub quantity: i32,
    pub total_price: i64,
    pub granted_points: i64,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<GiftTransactionEntity> for GiftTransactionModel {
    fn from(entity: GiftTransactionEntity) -> Self {
        Self {
            id: entity.id,
            gift_id: entity.gift_id,
            stream_id: entity.stream_id,
            from_user_id: entity.from_user_id,
            to_user_id: entity.to_user_id,
            quantity: entity.quantity,
            total_price: entity.total_price,
            granted_points: entity.granted_points,
            message: entity.message,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipientDto {
    pub user_id: i64,
    pub level: i32,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseReceiptDto {
    pub transaction: GiftTransactionModel,
    pub new_balance: i64,
    pub recipient: RecipientDto,
    pub gift: GiftModel,
}

impl From<PurchaseOutcome> for PurchaseReceiptDto {
    fn from(outcome: PurchaseOutcome) -> Self {
        Self {
            transaction: GiftTransactionModel::from(outcome.transaction),
            new_balance: outcome.new_balance,
            recipient: RecipientDto {
                user_id: outcome.recipient.user_id,
                level: outcome.recipient.level,
                points: outcome.recipient.points,
            },
            gift: GiftModel::from(outcome.gift),
        }
    }
}

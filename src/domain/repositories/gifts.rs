use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::gifts::GiftEntity;
use crate::domain::errors::EconomyError;

#[async_trait]
#[automock]
pub trait GiftRepository {
    /// Inserts the gift or, when a gift with the same key exists,
    /// overwrites its mutable fields.
    async fn upsert(
        &self,
        key: String,
        name: String,
        price: i64,
        points: i64,
        metadata: Option<serde_json::Value>,
    ) -> Result<GiftEntity, EconomyError>;

    async fn list(&self) -> Result<Vec<GiftEntity>, EconomyError>;
}

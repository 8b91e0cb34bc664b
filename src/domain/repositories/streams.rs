use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::entities::streams::{InsertStreamEntity, StreamEntity};
use crate::domain::errors::EconomyError;

#[async_trait]
#[automock]
pub trait StreamRepository {
    async fn create(&self, entity: InsertStreamEntity) -> Result<StreamEntity, EconomyError>;
    async fn find_by_id(&self, stream_id: i64) -> Result<Option<StreamEntity>, EconomyError>;
    async fn list_active(&self) -> Result<Vec<StreamEntity>, EconomyError>;
    async fn end(&self, stream_id: i64, ended_at: DateTime<Utc>)
        -> Result<StreamEntity, EconomyError>;
    async fn record_heartbeat(&self, stream_id: i64, at: DateTime<Utc>)
        -> Result<(), EconomyError>;
}

use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::level_settings::LevelSettingEntity;
use crate::domain::errors::EconomyError;

#[async_trait]
#[automock]
pub trait LevelSettingRepository {
    async fn list(&self) -> Result<Vec<LevelSettingEntity>, EconomyError>;
    async fn upsert(
        &self,
        level: i32,
        points_required: i64,
    ) -> Result<LevelSettingEntity, EconomyError>;
}

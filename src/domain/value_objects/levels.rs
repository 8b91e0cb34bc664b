use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::level_settings::LevelSettingEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct LevelThresholdModel {
    pub level: i32,
    #[serde(default)]
    pub points_required: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpsertLevelsModel {
    pub levels: Vec<LevelThresholdModel>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelSettingModel {
    pub level: i32,
    pub points_required: i64,
    pub created_at: DateTime<Utc>,
}

impl From<LevelSettingEntity> for LevelSettingModel {
    fn from(entity: LevelSettingEntity) -> Self {
        Self {
            level: entity.level,
            points_required: entity.points_required,
            created_at: entity.created_at,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::stream_participants::ParticipantEntity;
use crate::domain::leveling::LevelProgress;

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantModel {
    pub stream_id: i64,
    pub user_id: i64,
    pub level: i32,
    pub points: i64,
    pub accumulated_seconds: i64,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

impl From<ParticipantEntity> for ParticipantModel {
    fn from(entity: ParticipantEntity) -> Self {
        Self {
            stream_id: entity.stream_id,
            user_id: entity.user_id,
            level: entity.level,
            points: entity.points,
            accumulated_seconds: entity.accumulated_seconds,
            joined_at: entity.joined_at,
            left_at: entity.left_at,
        }
    }
}

/// Manual stream-scoped point adjustment; always routed through the
/// leveling policy, never a raw write of level/points.
#[derive(Debug, Clone, Deserialize)]
pub struct AdjustPointsModel {
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelProgressDto {
    pub level: i32,
    pub points: i64,
    pub levels_gained: i32,
}

impl From<LevelProgress> for LevelProgressDto {
    fn from(progress: LevelProgress) -> Self {
        Self {
            level: progress.level,
            points: progress.points,
            levels_gained: progress.levels_gained,
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::streams::StreamEntity;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStreamModel {
    pub title: Option<String>,
    pub room_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamModel {
    pub id: i64,
    pub streamer_id: i64,
    pub title: Option<String>,
    pub room_url: Option<String>,
    pub is_active: bool,
    pub last_heartbeat: Option<DateTime<Utc>>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl From<StreamEntity> for StreamModel {
    fn from(entity: StreamEntity) -> Self {
        Self {
            id: entity.id,
            streamer_id: entity.streamer_id,
            title: entity.title,
            room_url: entity.room_url,
            is_active: entity.is_active,
            last_heartbeat: entity.last_heartbeat,
            started_at: entity.started_at,
            ended_at: entity.ended_at,
        }
    }
}

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::stream_participants;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = stream_participants)]
pub struct ParticipantEntity {
    pub id: i64,
    pub stream_id: i64,
    pub user_id: i64,
    pub level: i32,
    pub points: i64,
    pub accumulated_seconds: i64,
    pub joined_at: DateTime<Utc>,
    pub left_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stream_participants)]
pub struct InsertParticipantEntity {
    pub stream_id: i64,
    pub user_id: i64,
    pub level: i32,
    pub points: i64,
    pub accumulated_seconds: i64,
    pub joined_at: DateTime<Utc>,
}

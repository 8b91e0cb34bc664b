use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::streams;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = streams)]
pub struct StreamEntity {
    pub id: i64,
    pub streamer_id: i64,
    pub title: Option<String>,
    pub room_url: Option<String>,
    pub is_active: bool,
    pub last_heartbeat: Option<DateTime<Utc>>,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = streams)]
pub struct InsertStreamEntity {
    pub streamer_id: i64,
    pub title: Option<String>,
    pub room_url: Option<String>,
    pub is_active: bool,
    pub started_at: DateTime<Utc>,
}

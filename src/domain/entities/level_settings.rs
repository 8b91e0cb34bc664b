use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::infrastructure::postgres::schema::level_settings;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = level_settings, primary_key(level))]
pub struct LevelSettingEntity {
    pub level: i32,
    pub points_required: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = level_settings)]
pub struct InsertLevelSettingEntity {
    pub level: i32,
    pub points_required: i64,
    pub created_at: DateTime<Utc>,
}

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::level_settings::{InsertLevelSettingEntity, LevelSettingEntity},
        errors::EconomyError,
        repositories::level_settings::LevelSettingRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::level_settings},
};

pub struct LevelSettingPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl LevelSettingPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl LevelSettingRepository for LevelSettingPostgres {
    async fn list(&self) -> Result<Vec<LevelSettingEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = level_settings::table
            .order(level_settings::level.asc())
            .select(LevelSettingEntity::as_select())
            .load::<LevelSettingEntity>(&mut conn)?;

        Ok(results)
    }

    async fn upsert(
        &self,
        level: i32,
        points_required: i64,
    ) -> Result<LevelSettingEntity, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::insert_into(level_settings::table)
            .values(&InsertLevelSettingEntity {
                level,
                points_required,
                created_at: Utc::now(),
            })
            .on_conflict(level_settings::level)
            .do_update()
            .set(level_settings::points_required.eq(points_required))
            .returning(LevelSettingEntity::as_returning())
            .get_result::<LevelSettingEntity>(&mut conn)?;

        Ok(result)
    }
}

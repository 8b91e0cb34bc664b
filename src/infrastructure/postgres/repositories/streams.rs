use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::streams::{InsertStreamEntity, StreamEntity},
        errors::EconomyError,
        repositories::streams::StreamRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::streams},
};

pub struct StreamPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl StreamPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl StreamRepository for StreamPostgres {
    async fn create(&self, entity: InsertStreamEntity) -> Result<StreamEntity, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::insert_into(streams::table)
            .values(&entity)
            .returning(StreamEntity::as_returning())
            .get_result::<StreamEntity>(&mut conn)?;

        Ok(result)
    }

    async fn find_by_id(&self, stream_id: i64) -> Result<Option<StreamEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = streams::table
            .find(stream_id)
            .select(StreamEntity::as_select())
            .first::<StreamEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn list_active(&self) -> Result<Vec<StreamEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = streams::table
            .filter(streams::is_active.eq(true))
            .order(streams::started_at.desc())
            .select(StreamEntity::as_select())
            .load::<StreamEntity>(&mut conn)?;

        Ok(results)
    }

    async fn end(
        &self,
        stream_id: i64,
        ended_at: DateTime<Utc>,
    ) -> Result<StreamEntity, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = diesel::update(streams::table.find(stream_id))
            .set((
                streams::is_active.eq(false),
                streams::ended_at.eq(Some(ended_at)),
            ))
            .returning(StreamEntity::as_returning())
            .get_result::<StreamEntity>(&mut conn)
            .optional()?
            .ok_or(EconomyError::NotFound("stream"))?;

        Ok(result)
    }

    async fn record_heartbeat(
        &self,
        stream_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::update(streams::table.find(stream_id))
            .set(streams::last_heartbeat.eq(Some(at)))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(EconomyError::NotFound("stream"));
        }

        Ok(())
    }
}

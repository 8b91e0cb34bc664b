use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::{
        entities::gifts::{GiftEntity, InsertGiftEntity},
        errors::EconomyError,
        repositories::gifts::GiftRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::gifts},
};

pub struct GiftPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl GiftPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl GiftRepository for GiftPostgres {
    async fn upsert(
        &self,
        key: String,
        name: String,
        price: i64,
        points: i64,
        metadata: Option<Value>,
    ) -> Result<GiftEntity, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            let existing = gifts::table
                .filter(gifts::key.eq(&key))
                .for_update()
                .select(GiftEntity::as_select())
                .first::<GiftEntity>(conn)
                .optional()?;

            let result = match existing {
                Some(gift) => diesel::update(gifts::table.find(gift.id))
                    .set((
                        gifts::name.eq(&name),
                        gifts::price.eq(price),
                        gifts::points.eq(points),
                        gifts::metadata.eq(&metadata),
                    ))
                    .returning(GiftEntity::as_returning())
                    .get_result::<GiftEntity>(conn)?,
                None => diesel::insert_into(gifts::table)
                    .values(&InsertGiftEntity {
                        key,
                        name,
                        price,
                        points,
                        metadata,
                        created_at: Utc::now(),
                    })
                    .returning(GiftEntity::as_returning())
                    .get_result::<GiftEntity>(conn)?,
            };

            Ok(result)
        })
    }

    async fn list(&self) -> Result<Vec<GiftEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = gifts::table
            .order(gifts::id.asc())
            .select(GiftEntity::as_select())
            .load::<GiftEntity>(&mut conn)?;

        Ok(results)
    }
}

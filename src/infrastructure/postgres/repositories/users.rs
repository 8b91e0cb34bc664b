use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::users::UserEntity,
        errors::EconomyError,
        leveling::{self, LevelProgress},
        repositories::users::UserRepository,
    },
    infrastructure::postgres::{
        leveling::load_thresholds, postgres_connection::PgPoolSquad, schema::users,
    },
};

pub struct UserPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl UserPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl UserRepository for UserPostgres {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = users::table
            .find(user_id)
            .select(UserEntity::as_select())
            .first::<UserEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn credit_points(
        &self,
        user_id: i64,
        delta: i64,
    ) -> Result<LevelProgress, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            let user = users::table
                .find(user_id)
                .for_update()
                .select(UserEntity::as_select())
                .first::<UserEntity>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("user"))?;

            let thresholds = load_thresholds(conn)?;
            let progress = leveling::apply(user.level, user.points, delta, &thresholds);

            diesel::update(users::table.find(user_id))
                .set((
                    users::level.eq(progress.level),
                    users::points.eq(progress.points),
                    users::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            Ok(progress)
        })
    }

    async fn debit_coins(&self, user_id: i64, amount: i64) -> Result<i64, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            let coins = users::table
                .find(user_id)
                .for_update()
                .select(users::coins)
                .first::<i64>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("user"))?;

            if coins < amount {
                return Err(EconomyError::InsufficientBalance);
            }

            let new_balance = diesel::update(users::table.find(user_id))
                .set((
                    users::coins.eq(coins - amount),
                    users::updated_at.eq(Utc::now()),
                ))
                .returning(users::coins)
                .get_result::<i64>(conn)?;

            Ok(new_balance)
        })
    }

    async fn credit_coins(&self, user_id: i64, amount: i64) -> Result<i64, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let new_balance = diesel::update(users::table.find(user_id))
            .set((
                users::coins.eq(users::coins + amount),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(users::coins)
            .get_result::<i64>(&mut conn)
            .optional()?
            .ok_or(EconomyError::NotFound("user"))?;

        Ok(new_balance)
    }

    async fn increment_level(&self, user_id: i64) -> Result<i32, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let new_level = diesel::update(users::table.find(user_id))
            .set((
                users::level.eq(users::level + 1),
                users::updated_at.eq(Utc::now()),
            ))
            .returning(users::level)
            .get_result::<i32>(&mut conn)
            .optional()?
            .ok_or(EconomyError::NotFound("user"))?;

        Ok(new_level)
    }
}

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::gift_transactions::{GiftTransactionEntity, InsertGiftTransactionEntity},
        entities::gifts::GiftEntity,
        errors::EconomyError,
        repositories::gift_transactions::GiftTransactionRepository,
        value_objects::purchases::{PurchaseCommand, PurchaseOutcome, RecipientProgress},
    },
    infrastructure::postgres::{
        postgres_connection::PgPoolSquad,
        repositories::participants::{credit_locked, find_or_create_locked},
        schema::{gift_transactions, gifts, streams, users},
    },
};

pub struct GiftTransactionPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl GiftTransactionPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl GiftTransactionRepository for GiftTransactionPostgres {
    async fn purchase(
        &self,
        command: PurchaseCommand,
    ) -> Result<PurchaseOutcome, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<PurchaseOutcome, EconomyError, _>(|conn| {
            // The active flag only gates the scheduler; purchases against an
            // ended stream still land in its history.
            let streamer_id = streams::table
                .find(command.stream_id)
                .select(streams::streamer_id)
                .first::<i64>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("stream"))?;

            let (buyer_name, buyer_coins) = users::table
                .find(command.buyer_id)
                .for_update()
                .select((users::name, users::coins))
                .first::<(String, i64)>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("user"))?;

            let gift = gifts::table
                .filter(gifts::key.eq(&command.gift_key))
                .select(GiftEntity::as_select())
                .first::<GiftEntity>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("gift"))?;

            let quantity = i64::from(command.quantity);
            let total_price = gift.price * quantity;
            let granted_points = gift.points * quantity;

            if buyer_coins < total_price {
                return Err(EconomyError::InsufficientBalance);
            }

            let new_balance = diesel::update(users::table.find(command.buyer_id))
                .set((
                    users::coins.eq(buyer_coins - total_price),
                    users::updated_at.eq(Utc::now()),
                ))
                .returning(users::coins)
                .get_result::<i64>(conn)?;

            let recipient_id = command.recipient_id.unwrap_or(streamer_id);

            let transaction = diesel::insert_into(gift_transactions::table)
                .values(&InsertGiftTransactionEntity {
                    gift_id: gift.id,
                    stream_id: command.stream_id,
                    from_user_id: command.buyer_id,
                    to_user_id: recipient_id,
                    quantity: command.quantity,
                    total_price,
                    granted_points,
                    message: command.message.clone(),
                    transaction_meta: command.transaction_meta.clone(),
                    created_at: Utc::now(),
                })
                .returning(GiftTransactionEntity::as_returning())
                .get_result::<GiftTransactionEntity>(conn)?;

            let participant = find_or_create_locked(conn, command.stream_id, recipient_id)?;
            let progress = credit_locked(conn, &participant, granted_points, 0)?;

            let recipient_name = users::table
                .find(recipient_id)
                .select(users::name)
                .first::<String>(conn)
                .optional()?
                .unwrap_or_else(|| format!("user {}", recipient_id));

            Ok(PurchaseOutcome {
                transaction,
                gift,
                buyer_name,
                new_balance,
                recipient: RecipientProgress {
                    user_id: recipient_id,
                    name: recipient_name,
                    level: progress.level,
                    points: progress.points,
                    levels_gained: progress.levels_gained,
                },
            })
        })
    }

    async fn recent_for_stream(
        &self,
        stream_id: i64,
        limit: i64,
    ) -> Result<Vec<GiftTransactionEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let exists = streams::table
            .find(stream_id)
            .select(streams::id)
            .first::<i64>(&mut conn)
            .optional()?;

        if exists.is_none() {
            return Err(EconomyError::NotFound("stream"));
        }

        let results = gift_transactions::table
            .filter(gift_transactions::stream_id.eq(stream_id))
            .order(gift_transactions::created_at.desc())
            .limit(limit)
            .select(GiftTransactionEntity::as_select())
            .load::<GiftTransactionEntity>(&mut conn)?;

        Ok(results)
    }
}

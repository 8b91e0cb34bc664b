use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::{
    errors::EconomyError,
    repositories::{
        gift_transactions::GiftTransactionRepository,
        notifications::{MessageAuthor, NotificationSink},
    },
    value_objects::purchases::{
        GiftTransactionModel, PurchaseCommand, PurchaseGiftModel, PurchaseOutcome,
        PurchaseReceiptDto,
    },
};

const DEFAULT_RECENT_LIMIT: i64 = 20;
const MIN_RECENT_LIMIT: i64 = 10;
const MAX_RECENT_LIMIT: i64 = 100;

pub struct GiftPurchaseUseCase<T, N>
where
    T: GiftTransactionRepository + Send + Sync + 'static,
    N: NotificationSink + Send + Sync + 'static,
{
    transaction_repository: Arc<T>,
    notification_sink: Arc<N>,
}

impl<T, N> GiftPurchaseUseCase<T, N>
where
    T: GiftTransactionRepository + Send + Sync + 'static,
    N: NotificationSink + Send + Sync + 'static,
{
    pub fn new(transaction_repository: Arc<T>, notification_sink: Arc<N>) -> Self {
        Self {
            transaction_repository,
            notification_sink,
        }
    }

    pub async fn purchase(
        &self,
        buyer_id: i64,
        stream_id: i64,
        model: PurchaseGiftModel,
    ) -> Result<PurchaseReceiptDto, EconomyError> {
        if model.gift_key.trim().is_empty() {
            return Err(EconomyError::Validation(
                "gift_key must not be empty".to_string(),
            ));
        }

        let quantity = model.quantity.unwrap_or(1).max(1);

        let outcome = self
            .transaction_repository
            .purchase(PurchaseCommand {
                stream_id,
                buyer_id,
                gift_key: model.gift_key,
                quantity,
                recipient_id: model.to_user_id,
                message: model.message,
                transaction_meta: model.transaction_meta,
            })
            .await?;

        info!(
            stream_id,
            buyer_id,
            transaction_id = outcome.transaction.id,
            gift_key = %outcome.gift.key,
            quantity,
            total_price = outcome.transaction.total_price,
            "gift_purchase: purchase committed"
        );

        // The purchase is already durable; announcements must never undo it.
        self.announce(stream_id, buyer_id, &outcome).await;

        Ok(PurchaseReceiptDto::from(outcome))
    }

    async fn announce(&self, stream_id: i64, buyer_id: i64, outcome: &PurchaseOutcome) {
        let mut text = format!(
            "{} sent {} x{}",
            outcome.buyer_name, outcome.gift.name, outcome.transaction.quantity
        );
        if let Some(message) = &outcome.transaction.message {
            text.push_str(" — ");
            text.push_str(message);
        }

        if let Err(err) = self
            .notification_sink
            .append(
                stream_id,
                MessageAuthor::User {
                    id: buyer_id,
                    name: outcome.buyer_name.clone(),
                },
                text,
            )
            .await
        {
            warn!(
                stream_id,
                transaction_id = outcome.transaction.id,
                error = ?err,
                "gift_purchase: failed to append gift announcement"
            );
        }

        if outcome.recipient.levels_gained > 0 {
            let text = format!(
                "{} reached level {}!",
                outcome.recipient.name, outcome.recipient.level
            );

            if let Err(err) = self
                .notification_sink
                .append(stream_id, MessageAuthor::System, text)
                .await
            {
                warn!(
                    stream_id,
                    recipient_id = outcome.recipient.user_id,
                    error = ?err,
                    "gift_purchase: failed to append level-up announcement"
                );
            }
        }
    }

    pub async fn recent(
        &self,
        stream_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<GiftTransactionModel>, EconomyError> {
        let limit = limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(MIN_RECENT_LIMIT, MAX_RECENT_LIMIT);

        let transactions = self
            .transaction_repository
            .recent_for_stream(stream_id, limit)
            .await?;

        Ok(transactions
            .into_iter()
            .map(GiftTransactionModel::from)
            .collect())
    }
}

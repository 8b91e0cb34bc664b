use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::gift_transactions::GiftTransactionEntity;
use crate::domain::errors::EconomyError;
use crate::domain::value_objects::purchases::{PurchaseCommand, PurchaseOutcome};

#[async_trait]
#[automock]
pub trait GiftTransactionRepository {
    /// Runs the whole purchase as one atomic unit of work: resolve stream,
    /// buyer (locked) and gift, check and debit the balance, append the
    /// transaction record, credit the recipient's stream-scoped account
    /// (locked) through the leveling policy. Nothing is observable unless
    /// every step committed.
    async fn purchase(&self, command: PurchaseCommand)
        -> Result<PurchaseOutcome, EconomyError>;

    /// Recent transactions for a stream, newest first. Fails `NotFound`
    /// when the stream does not exist.
    async fn recent_for_stream(
        &self,
        stream_id: i64,
        limit: i64,
    ) -> Result<Vec<GiftTransactionEntity>, EconomyError>;
}

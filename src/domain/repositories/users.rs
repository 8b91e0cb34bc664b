use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::users::UserEntity;
use crate::domain::errors::EconomyError;
use crate::domain::leveling::LevelProgress;

#[async_trait]
#[automock]
pub trait UserRepository {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserEntity>, EconomyError>;

    /// Credits points against the user's lifetime progression, applying the
    /// leveling policy under a row lock.
    async fn credit_points(&self, user_id: i64, delta: i64)
        -> Result<LevelProgress, EconomyError>;

    /// Fails with `InsufficientBalance` before any write when the balance
    /// does not cover `amount`. Returns the new balance.
    async fn debit_coins(&self, user_id: i64, amount: i64) -> Result<i64, EconomyError>;

    async fn credit_coins(&self, user_id: i64, amount: i64) -> Result<i64, EconomyError>;

    /// Unconditional +1 on the global level; the streamer progression path
    /// deliberately bypasses points and thresholds.
    async fn increment_level(&self, user_id: i64) -> Result<i32, EconomyError>;
}

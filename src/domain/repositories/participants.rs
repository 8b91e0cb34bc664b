use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;

use crate::domain::entities::stream_participants::ParticipantEntity;
use crate::domain::errors::EconomyError;
use crate::domain::leveling::LevelProgress;

#[async_trait]
#[automock]
pub trait ParticipantRepository {
    async fn find(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<Option<ParticipantEntity>, EconomyError>;

    /// Lazily creates the stream-scoped account at level 1 with 0 points.
    async fn find_or_create(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<ParticipantEntity, EconomyError>;

    /// Soft leave: records `left_at`, the row is kept.
    async fn leave(
        &self,
        stream_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), EconomyError>;

    /// Participants of the stream that have not left.
    async fn list_active_for_stream(
        &self,
        stream_id: i64,
    ) -> Result<Vec<ParticipantEntity>, EconomyError>;

    /// Credits stream-scoped points through the leveling policy, creating
    /// the participant if absent. Row-locked for the whole update.
    async fn credit_points(
        &self,
        stream_id: i64,
        user_id: i64,
        delta: i64,
    ) -> Result<LevelProgress, EconomyError>;

    /// One scheduler tick worth of progression: accumulates watched seconds
    /// and credits points in the same locked transaction.
    async fn award_watch_time(
        &self,
        stream_id: i64,
        user_id: i64,
        seconds: i64,
        delta: i64,
    ) -> Result<LevelProgress, EconomyError>;
}

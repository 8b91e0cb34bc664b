use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;

use crate::{
    domain::{
        entities::stream_participants::{InsertParticipantEntity, ParticipantEntity},
        errors::EconomyError,
        leveling::{self, LevelProgress},
        repositories::participants::ParticipantRepository,
    },
    infrastructure::postgres::{
        leveling::load_thresholds, postgres_connection::PgPoolSquad, schema::stream_participants,
    },
};

pub struct ParticipantPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ParticipantPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

/// Locks the participant row for the caller's transaction, inserting the
/// level 1 / 0 points row when the pair has never interacted before.
pub(crate) fn find_or_create_locked(
    conn: &mut PgConnection,
    stream_id: i64,
    user_id: i64,
) -> Result<ParticipantEntity, EconomyError> {
    let existing = stream_participants::table
        .filter(stream_participants::stream_id.eq(stream_id))
        .filter(stream_participants::user_id.eq(user_id))
        .for_update()
        .select(ParticipantEntity::as_select())
        .first::<ParticipantEntity>(conn)
        .optional()?;

    if let Some(participant) = existing {
        return Ok(participant);
    }

    let inserted = diesel::insert_into(stream_participants::table)
        .values(&InsertParticipantEntity {
            stream_id,
            user_id,
            level: 1,
            points: 0,
            accumulated_seconds: 0,
            joined_at: Utc::now(),
        })
        .returning(ParticipantEntity::as_returning())
        .get_result::<ParticipantEntity>(conn)?;

    Ok(inserted)
}

/// Applies the leveling policy to a locked participant row and persists
/// the outcome. Every stream-scoped point mutation funnels through here.
pub(crate) fn credit_locked(
    conn: &mut PgConnection,
    participant: &ParticipantEntity,
    delta: i64,
    watched_seconds: i64,
) -> Result<LevelProgress, EconomyError> {
    let thresholds = load_thresholds(conn)?;
    let progress = leveling::apply(participant.level, participant.points, delta, &thresholds);

    diesel::update(stream_participants::table.find(participant.id))
        .set((
            stream_participants::level.eq(progress.level),
            stream_participants::points.eq(progress.points),
            stream_participants::accumulated_seconds
                .eq(participant.accumulated_seconds + watched_seconds),
        ))
        .execute(conn)?;

    Ok(progress)
}

#[async_trait]
impl ParticipantRepository for ParticipantPostgres {
    async fn find(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<Option<ParticipantEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = stream_participants::table
            .filter(stream_participants::stream_id.eq(stream_id))
            .filter(stream_participants::user_id.eq(user_id))
            .select(ParticipantEntity::as_select())
            .first::<ParticipantEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn find_or_create(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<ParticipantEntity, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            find_or_create_locked(conn, stream_id, user_id)
        })
    }

    async fn leave(
        &self,
        stream_id: i64,
        user_id: i64,
        at: DateTime<Utc>,
    ) -> Result<(), EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let affected = diesel::update(
            stream_participants::table
                .filter(stream_participants::stream_id.eq(stream_id))
                .filter(stream_participants::user_id.eq(user_id)),
        )
        .set(stream_participants::left_at.eq(Some(at)))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(EconomyError::NotFound("participant"));
        }

        Ok(())
    }

    async fn list_active_for_stream(
        &self,
        stream_id: i64,
    ) -> Result<Vec<ParticipantEntity>, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = stream_participants::table
            .filter(stream_participants::stream_id.eq(stream_id))
            .filter(stream_participants::left_at.is_null())
            .select(ParticipantEntity::as_select())
            .load::<ParticipantEntity>(&mut conn)?;

        Ok(results)
    }

    async fn credit_points(
        &self,
        stream_id: i64,
        user_id: i64,
        delta: i64,
    ) -> Result<LevelProgress, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            let participant = find_or_create_locked(conn, stream_id, user_id)?;
            credit_locked(conn, &participant, delta, 0)
        })
    }

    async fn award_watch_time(
        &self,
        stream_id: i64,
        user_id: i64,
        seconds: i64,
        delta: i64,
    ) -> Result<LevelProgress, EconomyError> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        conn.transaction::<_, EconomyError, _>(|conn| {
            let participant = stream_participants::table
                .filter(stream_participants::stream_id.eq(stream_id))
                .filter(stream_participants::user_id.eq(user_id))
                .filter(stream_participants::left_at.is_null())
                .for_update()
                .select(ParticipantEntity::as_select())
                .first::<ParticipantEntity>(conn)
                .optional()?
                .ok_or(EconomyError::NotFound("participant"))?;

            credit_locked(conn, &participant, delta, seconds)
        })
    }
}

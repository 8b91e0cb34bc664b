use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::{
    entities::streams::InsertStreamEntity,
    errors::EconomyError,
    repositories::{participants::ParticipantRepository, streams::StreamRepository},
    value_objects::{
        participants::{AdjustPointsModel, LevelProgressDto, ParticipantModel},
        roles::Role,
        streams::{CreateStreamModel, StreamModel},
    },
};

pub struct StreamsUseCase<S, P>
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    stream_repository: Arc<S>,
    participant_repository: Arc<P>,
}

impl<S, P> StreamsUseCase<S, P>
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    pub fn new(stream_repository: Arc<S>, participant_repository: Arc<P>) -> Self {
        Self {
            stream_repository,
            participant_repository,
        }
    }

    pub async fn create(
        &self,
        streamer_id: i64,
        role: Role,
        model: CreateStreamModel,
    ) -> Result<StreamModel, EconomyError> {
        if !role.can_manage_catalog() {
            return Err(EconomyError::Forbidden);
        }

        let stream = self
            .stream_repository
            .create(InsertStreamEntity {
                streamer_id,
                title: model.title,
                room_url: model.room_url,
                is_active: true,
                started_at: Utc::now(),
            })
            .await?;

        info!(stream_id = stream.id, streamer_id, "streams: stream started");
        Ok(StreamModel::from(stream))
    }

    pub async fn list_active(&self) -> Result<Vec<StreamModel>, EconomyError> {
        let streams = self.stream_repository.list_active().await?;
        Ok(streams.into_iter().map(StreamModel::from).collect())
    }

    pub async fn get(&self, stream_id: i64) -> Result<StreamModel, EconomyError> {
        let stream = self
            .stream_repository
            .find_by_id(stream_id)
            .await?
            .ok_or(EconomyError::NotFound("stream"))?;

        Ok(StreamModel::from(stream))
    }

    pub async fn end(
        &self,
        stream_id: i64,
        caller_id: i64,
        role: Role,
    ) -> Result<StreamModel, EconomyError> {
        self.authorize_owner(stream_id, caller_id, role).await?;

        let stream = self.stream_repository.end(stream_id, Utc::now()).await?;
        info!(stream_id, "streams: stream ended");
        Ok(StreamModel::from(stream))
    }

    pub async fn heartbeat(
        &self,
        stream_id: i64,
        caller_id: i64,
        role: Role,
    ) -> Result<(), EconomyError> {
        self.authorize_owner(stream_id, caller_id, role).await?;
        self.stream_repository
            .record_heartbeat(stream_id, Utc::now())
            .await
    }

    pub async fn join(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<ParticipantModel, EconomyError> {
        self.stream_repository
            .find_by_id(stream_id)
            .await?
            .ok_or(EconomyError::NotFound("stream"))?;

        let participant = self
            .participant_repository
            .find_or_create(stream_id, user_id)
            .await?;

        Ok(ParticipantModel::from(participant))
    }

    pub async fn leave(&self, stream_id: i64, user_id: i64) -> Result<(), EconomyError> {
        self.participant_repository
            .leave(stream_id, user_id, Utc::now())
            .await
    }

    /// Manual stream-scoped point delta: the participant themselves, the
    /// stream owner, or an admin. Always runs through the leveling policy.
    pub async fn adjust_points(
        &self,
        stream_id: i64,
        target_user_id: i64,
        caller_id: i64,
        role: Role,
        model: AdjustPointsModel,
    ) -> Result<LevelProgressDto, EconomyError> {
        if caller_id != target_user_id {
            self.authorize_owner(stream_id, caller_id, role).await?;
        }

        let progress = self
            .participant_repository
            .credit_points(stream_id, target_user_id, model.delta)
            .await?;

        info!(
            stream_id,
            user_id = target_user_id,
            delta = model.delta,
            level = progress.level,
            "streams: participant points adjusted"
        );
        Ok(LevelProgressDto::from(progress))
    }

    pub async fn participant(
        &self,
        stream_id: i64,
        user_id: i64,
    ) -> Result<ParticipantModel, EconomyError> {
        let participant = self
            .participant_repository
            .find(stream_id, user_id)
            .await?
            .ok_or(EconomyError::NotFound("participant"))?;

        Ok(ParticipantModel::from(participant))
    }

    async fn authorize_owner(
        &self,
        stream_id: i64,
        caller_id: i64,
        role: Role,
    ) -> Result<(), EconomyError> {
        let stream = self
            .stream_repository
            .find_by_id(stream_id)
            .await?
            .ok_or(EconomyError::NotFound("stream"))?;

        if stream.streamer_id != caller_id && !role.is_admin() {
            return Err(EconomyError::Forbidden);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::entities::{
        stream_participants::ParticipantEntity, streams::StreamEntity,
    };
    use crate::domain::repositories::{
        participants::MockParticipantRepository, streams::MockStreamRepository,
    };

    fn sample_stream(id: i64, streamer_id: i64, is_active: bool) -> StreamEntity {
        StreamEntity {
            id,
            streamer_id,
            title: Some("morning show".to_string()),
            room_url: None,
            is_active,
            last_heartbeat: None,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    fn sample_participant(stream_id: i64, user_id: i64) -> ParticipantEntity {
        ParticipantEntity {
            id: 1,
            stream_id,
            user_id,
            level: 1,
            points: 0,
            accumulated_seconds: 0,
            joined_at: Utc::now(),
            left_at: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_viewers() {
        let stream_repo = MockStreamRepository::new();
        let participant_repo = MockParticipantRepository::new();
        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));

        let result = usecase
            .create(
                10,
                Role::Viewer,
                CreateStreamModel {
                    title: None,
                    room_url: None,
                },
            )
            .await;

        assert!(matches!(result, Err(EconomyError::Forbidden)));
    }

    #[tokio::test]
    async fn end_rejects_callers_who_do_not_own_the_stream() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_stream(1, 10, true))) }));
        let participant_repo = MockParticipantRepository::new();

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let result = usecase.end(1, 99, Role::Streamer).await;

        assert!(matches!(result, Err(EconomyError::Forbidden)));
    }

    #[tokio::test]
    async fn end_allows_admins_on_any_stream() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_stream(1, 10, true))) }));
        stream_repo.expect_end().returning(|id, ended_at| {
            Box::pin(async move {
                let mut stream = sample_stream(id, 10, false);
                stream.ended_at = Some(ended_at);
                Ok(stream)
            })
        });
        let participant_repo = MockParticipantRepository::new();

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let stream = usecase.end(1, 99, Role::Admin).await.unwrap();

        assert!(!stream.is_active);
    }

    #[tokio::test]
    async fn join_accepts_ended_streams() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_stream(1, 10, false))) }));
        let mut participant_repo = MockParticipantRepository::new();
        participant_repo
            .expect_find_or_create()
            .with(eq(1), eq(20))
            .returning(|stream_id, user_id| {
                Box::pin(async move { Ok(sample_participant(stream_id, user_id)) })
            });

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let participant = usecase.join(1, 20).await.unwrap();

        assert_eq!(participant.user_id, 20);
    }

    #[tokio::test]
    async fn join_requires_an_existing_stream() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(|_| Box::pin(async { Ok(None) }));
        let participant_repo = MockParticipantRepository::new();

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let result = usecase.join(7, 20).await;

        assert!(matches!(result, Err(EconomyError::NotFound("stream"))));
    }

    #[tokio::test]
    async fn adjust_points_allows_participants_to_adjust_themselves() {
        let stream_repo = MockStreamRepository::new();
        let mut participant_repo = MockParticipantRepository::new();
        participant_repo
            .expect_credit_points()
            .with(eq(1), eq(20), eq(15))
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(crate::domain::leveling::LevelProgress {
                        level: 1,
                        points: 15,
                        levels_gained: 0,
                    })
                })
            });

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let progress = usecase
            .adjust_points(1, 20, 20, Role::Viewer, AdjustPointsModel { delta: 15 })
            .await
            .unwrap();

        assert_eq!(progress.points, 15);
    }

    #[tokio::test]
    async fn adjust_points_passes_zero_deltas_through() {
        let stream_repo = MockStreamRepository::new();
        let mut participant_repo = MockParticipantRepository::new();
        participant_repo
            .expect_credit_points()
            .with(eq(1), eq(20), eq(0))
            .returning(|_, _, _| {
                Box::pin(async {
                    Ok(crate::domain::leveling::LevelProgress {
                        level: 2,
                        points: 40,
                        levels_gained: 0,
                    })
                })
            });

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let progress = usecase
            .adjust_points(1, 20, 20, Role::Viewer, AdjustPointsModel { delta: 0 })
            .await
            .unwrap();

        assert_eq!(progress.level, 2);
        assert_eq!(progress.points, 40);
    }

    #[tokio::test]
    async fn adjust_points_rejects_strangers_adjusting_others() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_stream(1, 10, true))) }));
        let participant_repo = MockParticipantRepository::new();

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let result = usecase
            .adjust_points(1, 20, 99, Role::Viewer, AdjustPointsModel { delta: 5 })
            .await;

        assert!(matches!(result, Err(EconomyError::Forbidden)));
    }

    #[tokio::test]
    async fn join_creates_the_participant_row() {
        let mut stream_repo = MockStreamRepository::new();
        stream_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|_| Box::pin(async { Ok(Some(sample_stream(1, 10, true))) }));
        let mut participant_repo = MockParticipantRepository::new();
        participant_repo
            .expect_find_or_create()
            .with(eq(1), eq(20))
            .returning(|stream_id, user_id| {
                Box::pin(async move { Ok(sample_participant(stream_id, user_id)) })
            });

        let usecase = StreamsUseCase::new(Arc::new(stream_repo), Arc::new(participant_repo));
        let participant = usecase.join(1, 20).await.unwrap();

        assert_eq!(participant.level, 1);
        assert_eq!(participant.points, 0);
    }
}

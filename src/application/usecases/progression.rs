use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    errors::EconomyError,
    repositories::{
        notifications::{MessageAuthor, NotificationSink},
        participants::ParticipantRepository,
        streams::StreamRepository,
        users::UserRepository,
    },
};

/// Per-tick grants for the background progression loops.
#[derive(Debug, Clone, Copy)]
pub struct ProgressionSettings {
    pub points_per_tick: i64,
    pub seconds_per_tick: i64,
    pub heartbeat_timeout_ms: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub streams: usize,
    pub credited: usize,
    pub failures: usize,
}

pub struct ProgressionUseCase {
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    stream_repository: Arc<dyn StreamRepository + Send + Sync>,
    participant_repository: Arc<dyn ParticipantRepository + Send + Sync>,
    notification_sink: Arc<dyn NotificationSink + Send + Sync>,
    settings: ProgressionSettings,
}

impl ProgressionUseCase {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        stream_repository: Arc<dyn StreamRepository + Send + Sync>,
        participant_repository: Arc<dyn ParticipantRepository + Send + Sync>,
        notification_sink: Arc<dyn NotificationSink + Send + Sync>,
        settings: ProgressionSettings,
    ) -> Self {
        Self {
            user_repository,
            stream_repository,
            participant_repository,
            notification_sink,
            settings,
        }
    }

    /// One pass of the watch-time loop: every active participant of every
    /// active stream gets this tick's points and seconds. A failure on one
    /// participant never stops the others.
    pub async fn participant_tick(&self) -> Result<TickReport, EconomyError> {
        let streams = self.stream_repository.list_active().await?;
        let mut report = TickReport {
            streams: streams.len(),
            ..Default::default()
        };

        for stream in streams {
            let participants = match self
                .participant_repository
                .list_active_for_stream(stream.id)
                .await
            {
                Ok(participants) => participants,
                Err(err) => {
                    warn!(
                        stream_id = stream.id,
                        error = ?err,
                        "progression: failed to list participants; skipping stream"
                    );
                    report.failures += 1;
                    continue;
                }
            };

            for participant in participants {
                match self
                    .participant_repository
                    .award_watch_time(
                        stream.id,
                        participant.user_id,
                        self.settings.seconds_per_tick,
                        self.settings.points_per_tick,
                    )
                    .await
                {
                    Ok(progress) => {
                        report.credited += 1;
                        if progress.levels_gained > 0 {
                            self.announce_level_up(stream.id, participant.user_id, progress.level)
                                .await;
                        }
                    }
                    Err(err) => {
                        warn!(
                            stream_id = stream.id,
                            user_id = participant.user_id,
                            error = ?err,
                            "progression: failed to credit participant"
                        );
                        report.failures += 1;
                    }
                }
            }
        }

        info!(
            streams = report.streams,
            credited = report.credited,
            failures = report.failures,
            "progression: participant tick done"
        );
        Ok(report)
    }

    /// One pass of the streamer loop: every streamer whose active stream
    /// sent a heartbeat within the timeout gains one global level.
    pub async fn streamer_tick(&self) -> Result<TickReport, EconomyError> {
        let streams = self.stream_repository.list_active().await?;
        let cutoff = Utc::now() - Duration::milliseconds(self.settings.heartbeat_timeout_ms);
        let mut report = TickReport {
            streams: streams.len(),
            ..Default::default()
        };

        for stream in streams {
            let alive = stream
                .last_heartbeat
                .map(|at| at >= cutoff)
                .unwrap_or(false);
            if !alive {
                debug!(
                    stream_id = stream.id,
                    "progression: heartbeat stale; skipping streamer"
                );
                continue;
            }

            match self.user_repository.increment_level(stream.streamer_id).await {
                Ok(level) => {
                    report.credited += 1;
                    self.announce_level_up(stream.id, stream.streamer_id, level)
                        .await;
                }
                Err(err) => {
                    warn!(
                        stream_id = stream.id,
                        streamer_id = stream.streamer_id,
                        error = ?err,
                        "progression: failed to level streamer"
                    );
                    report.failures += 1;
                }
            }
        }

        Ok(report)
    }

    async fn announce_level_up(&self, stream_id: i64, user_id: i64, level: i32) {
        let name = match self.user_repository.find_by_id(user_id).await {
            Ok(Some(user)) => user.name,
            Ok(None) => format!("user {}", user_id),
            Err(err) => {
                warn!(
                    stream_id,
                    user_id,
                    error = ?err,
                    "progression: failed to resolve name for level-up announcement"
                );
                format!("user {}", user_id)
            }
        };

        let text = format!("{} reached level {}!", name, level);
        if let Err(err) = self
            .notification_sink
            .append(stream_id, MessageAuthor::System, text)
            .await
        {
            warn!(
                stream_id,
                user_id,
                error = ?err,
                "progression: failed to append level-up announcement"
            );
        }
    }
}

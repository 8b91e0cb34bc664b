pub mod application;
pub mod auth;
pub mod background_worker;
pub mod config;
pub mod domain;
pub mod infrastructure;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::application::usecases::progression::{ProgressionSettings, ProgressionUseCase};
use crate::background_worker::progression_scheduler::ProgressionScheduler;
use crate::infrastructure::postgres::{
    postgres_connection,
    repositories::{
        messages::ChatMessagePostgres, participants::ParticipantPostgres,
        streams::StreamPostgres, users::UserPostgres,
    },
};

pub async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let postgres_pool = Arc::new(postgres_connection::establish_connection(
        &dotenvy_env.database.url,
    )?);
    info!("Postgres connection has been established");

    let progression = &dotenvy_env.progression;
    let progression_usecase = Arc::new(ProgressionUseCase::new(
        Arc::new(UserPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(StreamPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(ParticipantPostgres::new(Arc::clone(&postgres_pool))),
        Arc::new(ChatMessagePostgres::new(Arc::clone(&postgres_pool))),
        ProgressionSettings {
            points_per_tick: progression.points_per_tick,
            seconds_per_tick: ((progression.points_interval_ms + 500) / 1000) as i64,
            heartbeat_timeout_ms: progression.heartbeat_timeout_ms,
        },
    ));

    let scheduler = ProgressionScheduler::new(progression_usecase, progression);
    scheduler.start();

    infrastructure::axum_http::http_serve::start(
        Arc::new(dotenvy_env.clone()),
        Arc::clone(&postgres_pool),
    )
    .await?;

    scheduler.stop();

    Ok(())
}

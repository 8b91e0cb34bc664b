use std::sync::Arc;

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{
    application::usecases::level_settings::LevelSettingsUseCase,
    auth::AuthUser,
    domain::{
        repositories::level_settings::LevelSettingRepository,
        value_objects::levels::BulkUpsertLevelsModel,
    },
    infrastructure::{
        axum_http::error_responses::json_ok,
        postgres::{
            postgres_connection::PgPoolSquad, repositories::level_settings::LevelSettingPostgres,
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let level_setting_repository = LevelSettingPostgres::new(Arc::clone(&db_pool));
    let level_settings_usecase = LevelSettingsUseCase::new(Arc::new(level_setting_repository));

    Router::new()
        .route("/", get(list).post(bulk_upsert))
        .with_state(Arc::new(level_settings_usecase))
}

pub async fn list<L>(
    State(level_settings_usecase): State<Arc<LevelSettingsUseCase<L>>>,
) -> impl IntoResponse
where
    L: LevelSettingRepository + Send + Sync + 'static,
{
    match level_settings_usecase.list().await {
        Ok(settings) => json_ok(settings),
        Err(err) => err.into_response(),
    }
}

pub async fn bulk_upsert<L>(
    State(level_settings_usecase): State<Arc<LevelSettingsUseCase<L>>>,
    auth: AuthUser,
    Json(bulk_upsert_model): Json<BulkUpsertLevelsModel>,
) -> impl IntoResponse
where
    L: LevelSettingRepository + Send + Sync + 'static,
{
    match level_settings_usecase
        .bulk_upsert(auth.role, bulk_upsert_model)
        .await
    {
        Ok(applied) => json_ok(applied),
        Err(err) => err.into_response(),
    }
}

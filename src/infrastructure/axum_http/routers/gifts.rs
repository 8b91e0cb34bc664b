use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};

use crate::{
    application::usecases::gift_catalog::GiftCatalogUseCase,
    auth::AuthUser,
    domain::{repositories::gifts::GiftRepository, value_objects::gifts::UpsertGiftModel},
    infrastructure::{
        axum_http::error_responses::{json_created, json_ok},
        postgres::{postgres_connection::PgPoolSquad, repositories::gifts::GiftPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let gift_repository = GiftPostgres::new(Arc::clone(&db_pool));
    let gift_catalog_usecase = GiftCatalogUseCase::new(Arc::new(gift_repository));

    Router::new()
        .route("/", get(list).post(upsert))
        .with_state(Arc::new(gift_catalog_usecase))
}

pub async fn list<G>(
    State(gift_catalog_usecase): State<Arc<GiftCatalogUseCase<G>>>,
) -> impl IntoResponse
where
    G: GiftRepository + Send + Sync + 'static,
{
    match gift_catalog_usecase.list().await {
        Ok(gifts) => json_ok(gifts),
        Err(err) => err.into_response(),
    }
}

pub async fn upsert<G>(
    State(gift_catalog_usecase): State<Arc<GiftCatalogUseCase<G>>>,
    auth: AuthUser,
    Json(upsert_gift_model): Json<UpsertGiftModel>,
) -> impl IntoResponse
where
    G: GiftRepository + Send + Sync + 'static,
{
    match gift_catalog_usecase
        .upsert(auth.role, upsert_gift_model)
        .await
    {
        Ok(gift) => json_created(gift),
        Err(err) => err.into_response(),
    }
}

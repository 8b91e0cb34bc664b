use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::Deserialize;

use crate::{
    application::usecases::{gift_purchase::GiftPurchaseUseCase, streams::StreamsUseCase},
    auth::AuthUser,
    domain::{
        repositories::{
            gift_transactions::GiftTransactionRepository, notifications::NotificationSink,
            participants::ParticipantRepository, streams::StreamRepository,
        },
        value_objects::{
            participants::AdjustPointsModel,
            purchases::PurchaseGiftModel,
            streams::CreateStreamModel,
        },
    },
    infrastructure::{
        axum_http::error_responses::{json_created, json_ok},
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{
                gift_transactions::GiftTransactionPostgres, messages::ChatMessagePostgres,
                participants::ParticipantPostgres, streams::StreamPostgres,
            },
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let stream_repository = StreamPostgres::new(Arc::clone(&db_pool));
    let participant_repository = ParticipantPostgres::new(Arc::clone(&db_pool));
    let streams_usecase = StreamsUseCase::new(
        Arc::new(stream_repository),
        Arc::new(participant_repository),
    );

    let transaction_repository = GiftTransactionPostgres::new(Arc::clone(&db_pool));
    let notification_sink = ChatMessagePostgres::new(Arc::clone(&db_pool));
    let gift_purchase_usecase = GiftPurchaseUseCase::new(
        Arc::new(transaction_repository),
        Arc::new(notification_sink),
    );

    let stream_routes = Router::new()
        .route("/", post(create))
        .route("/active", get(list_active))
        .route("/:stream_id", get(get_stream))
        .route("/:stream_id/end", put(end))
        .route("/:stream_id/heartbeat", post(heartbeat))
        .route("/:stream_id/participants", post(join))
        .route("/:stream_id/participants/leave", post(leave))
        .route("/:stream_id/participants/:user_id", get(participant))
        .route(
            "/:stream_id/participants/:user_id/points",
            put(adjust_points),
        )
        .with_state(Arc::new(streams_usecase));

    let purchase_routes = Router::new()
        .route("/:stream_id/gifts", post(purchase))
        .route("/:stream_id/gifts/recent", get(recent))
        .with_state(Arc::new(gift_purchase_usecase));

    Router::new().merge(stream_routes).merge(purchase_routes)
}

pub async fn create<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Json(create_stream_model): Json<CreateStreamModel>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase
        .create(auth.user_id, auth.role, create_stream_model)
        .await
    {
        Ok(stream) => json_created(stream),
        Err(err) => err.into_response(),
    }
}

pub async fn list_active<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase.list_active().await {
        Ok(streams) => json_ok(streams),
        Err(err) => err.into_response(),
    }
}

pub async fn get_stream<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    Path(stream_id): Path<i64>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase.get(stream_id).await {
        Ok(stream) => json_ok(stream),
        Err(err) => err.into_response(),
    }
}

pub async fn end<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Path(stream_id): Path<i64>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase
        .end(stream_id, auth.user_id, auth.role)
        .await
    {
        Ok(stream) => json_ok(stream),
        Err(err) => err.into_response(),
    }
}

pub async fn heartbeat<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Path(stream_id): Path<i64>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase
        .heartbeat(stream_id, auth.user_id, auth.role)
        .await
    {
        Ok(()) => json_ok(serde_json::json!({ "status": "ok" })),
        Err(err) => err.into_response(),
    }
}

pub async fn join<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Path(stream_id): Path<i64>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase.join(stream_id, auth.user_id).await {
        Ok(participant) => json_created(participant),
        Err(err) => err.into_response(),
    }
}

pub async fn leave<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Path(stream_id): Path<i64>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase.leave(stream_id, auth.user_id).await {
        Ok(()) => json_ok(serde_json::json!({ "status": "ok" })),
        Err(err) => err.into_response(),
    }
}

pub async fn participant<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    Path((stream_id, user_id)): Path<(i64, i64)>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase.participant(stream_id, user_id).await {
        Ok(participant) => json_ok(participant),
        Err(err) => err.into_response(),
    }
}

pub async fn adjust_points<S, P>(
    State(streams_usecase): State<Arc<StreamsUseCase<S, P>>>,
    auth: AuthUser,
    Path((stream_id, user_id)): Path<(i64, i64)>,
    Json(adjust_points_model): Json<AdjustPointsModel>,
) -> impl IntoResponse
where
    S: StreamRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match streams_usecase
        .adjust_points(
            stream_id,
            user_id,
            auth.user_id,
            auth.role,
            adjust_points_model,
        )
        .await
    {
        Ok(progress) => json_ok(progress),
        Err(err) => err.into_response(),
    }
}

pub async fn purchase<T, N>(
    State(gift_purchase_usecase): State<Arc<GiftPurchaseUseCase<T, N>>>,
    auth: AuthUser,
    Path(stream_id): Path<i64>,
    Json(purchase_gift_model): Json<PurchaseGiftModel>,
) -> impl IntoResponse
where
    T: GiftTransactionRepository + Send + Sync + 'static,
    N: NotificationSink + Send + Sync + 'static,
{
    match gift_purchase_usecase
        .purchase(auth.user_id, stream_id, purchase_gift_model)
        .await
    {
        Ok(receipt) => json_created(receipt),
        Err(err) => err.into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<i64>,
}

pub async fn recent<T, N>(
    State(gift_purchase_usecase): State<Arc<GiftPurchaseUseCase<T, N>>>,
    Path(stream_id): Path<i64>,
    Query(query): Query<RecentQuery>,
) -> impl IntoResponse
where
    T: GiftTransactionRepository + Send + Sync + 'static,
    N: NotificationSink + Send + Sync + 'static,
{
    match gift_purchase_usecase.recent(stream_id, query.limit).await {
        Ok(transactions) => json_ok(transactions),
        Err(err) => err.into_response(),
    }
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    application::usecases::ledger::LedgerUseCase,
    auth::AuthUser,
    domain::{
        repositories::{participants::ParticipantRepository, users::UserRepository},
        value_objects::wallet::{AdjustCoinsModel, CreditPointsModel},
    },
    infrastructure::{
        axum_http::error_responses::json_ok,
        postgres::{
            postgres_connection::PgPoolSquad,
            repositories::{participants::ParticipantPostgres, users::UserPostgres},
        },
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let user_repository = UserPostgres::new(Arc::clone(&db_pool));
    let participant_repository = ParticipantPostgres::new(Arc::clone(&db_pool));
    let ledger_usecase = LedgerUseCase::new(
        Arc::new(user_repository),
        Arc::new(participant_repository),
    );

    Router::new()
        .route("/balance", get(balance))
        .route("/points", post(credit_points))
        .route("/coins/credit", post(credit_coins))
        .route("/coins/debit", post(debit_coins))
        .with_state(Arc::new(ledger_usecase))
}

pub async fn balance<U, P>(
    State(ledger_usecase): State<Arc<LedgerUseCase<U, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match ledger_usecase.balance(auth.user_id).await {
        Ok(balance) => json_ok(balance),
        Err(err) => err.into_response(),
    }
}

pub async fn credit_points<U, P>(
    State(ledger_usecase): State<Arc<LedgerUseCase<U, P>>>,
    auth: AuthUser,
    Json(credit_points_model): Json<CreditPointsModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match ledger_usecase
        .credit_points(auth.role, credit_points_model)
        .await
    {
        Ok(progress) => json_ok(progress),
        Err(err) => err.into_response(),
    }
}

pub async fn credit_coins<U, P>(
    State(ledger_usecase): State<Arc<LedgerUseCase<U, P>>>,
    auth: AuthUser,
    Json(adjust_coins_model): Json<AdjustCoinsModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match ledger_usecase
        .credit_coins(auth.role, adjust_coins_model)
        .await
    {
        Ok(balance) => json_ok(balance),
        Err(err) => err.into_response(),
    }
}

pub async fn debit_coins<U, P>(
    State(ledger_usecase): State<Arc<LedgerUseCase<U, P>>>,
    auth: AuthUser,
    Json(adjust_coins_model): Json<AdjustCoinsModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync + 'static,
    P: ParticipantRepository + Send + Sync + 'static,
{
    match ledger_usecase
        .debit_coins(auth.role, adjust_coins_model)
        .await
    {
        Ok(balance) => json_ok(balance),
        Err(err) => err.into_response(),
    }
}

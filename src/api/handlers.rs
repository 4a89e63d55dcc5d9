use crate::{
    api::{AppService, models::*},
    core::models::{AppLog, Ledger, NewTransaction, Settings, TransactionRecord},
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/transactions", get(list_transactions).post(record_transaction))
        .route("/balances", get(get_balances))
        .route("/balances/{currency}", get(get_balance))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(
        ("currency" = Option<String>, Query, description = "Only return transactions in this currency")
    ),
    responses(
        (status = 200, description = "Normalized ledger", body = Ledger),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn list_transactions(
    State(service): State<Arc<AppService>>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Ledger>, ApiError> {
    let mut ledger = service.load_ledger().await?;
    if let Some(currency) = query.currency.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        ledger.transactions.retain(|tx| tx.currency == currency);
    }
    Ok(Json(ledger))
}

#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Transaction appended", body = TransactionRecord),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 503, description = "Storage unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn record_transaction(
    State(service): State<Arc<AppService>>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<TransactionRecord>), ApiError> {
    let record = service.record_transaction(req).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

#[utoipa::path(
    get,
    path = "/api/balances",
    responses(
        (status = 200, description = "Balances per currency", body = BalancesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_balances(State(service): State<Arc<AppService>>) -> Result<Json<BalancesResponse>, ApiError> {
    let parties = service.parties();
    let balances = service
        .balances()
        .await?
        .into_iter()
        .map(|balance| BalanceView::new(balance, parties))
        .collect();
    Ok(Json(BalancesResponse {
        party_a: parties.a.clone(),
        party_b: parties.b.clone(),
        balances,
    }))
}

#[utoipa::path(
    get,
    path = "/api/balances/{currency}",
    params(
        ("currency" = String, Path, description = "Currency code, e.g. ARS")
    ),
    responses(
        (status = 200, description = "Balance of a single currency", body = BalanceView),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_balance(
    State(service): State<Arc<AppService>>,
    Path(currency): Path<String>,
) -> Result<Json<BalanceView>, ApiError> {
    let balance = service.balance(&currency).await?;
    Ok(Json(BalanceView::new(balance, service.parties())))
}

#[utoipa::path(
    get,
    path = "/api/settings",
    responses(
        (status = 200, description = "Current settings", body = Settings),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_settings(State(service): State<Arc<AppService>>) -> Result<Json<Settings>, ApiError> {
    let settings = service.load_settings().await?;
    Ok(Json(settings))
}

#[utoipa::path(
    put,
    path = "/api/settings",
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Settings saved", body = Settings),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn update_settings(
    State(service): State<Arc<AppService>>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>, ApiError> {
    let settings = Settings {
        default_split: req.default_split,
        categories: req.categories,
    };
    let saved = service.save_settings(settings, req.saved_by.as_deref()).await?;
    Ok(Json(saved))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses(
        (status = 200, description = "Application logs retrieved successfully", body = Vec<AppLog>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub(crate) async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    let logs = service.get_app_logs().await?;
    Ok(Json(logs))
}

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::errors::LedgerError;
use crate::core::models::{CurrencyBalance, Parties, SplitRatio};

#[derive(Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    pub default_split: SplitRatio,
    pub categories: Vec<String>,
    pub saved_by: Option<String>,
}

#[derive(Deserialize, ToSchema, Default)]
pub struct TransactionsQuery {
    /// Only return transactions in this currency.
    pub currency: Option<String>,
}

#[derive(Serialize, ToSchema, Debug)]
pub struct BalanceView {
    #[serde(flatten)]
    pub balance: CurrencyBalance,
    pub debtor: Option<String>,
    pub creditor: Option<String>,
    pub summary: String,
}

impl BalanceView {
    pub fn new(balance: CurrencyBalance, parties: &Parties) -> Self {
        let (debtor, creditor) = match balance.settlement.parties() {
            Some((debtor, creditor)) => (
                Some(parties.name(debtor).to_string()),
                Some(parties.name(creditor).to_string()),
            ),
            None => (None, None),
        };
        let summary = balance.summary(parties);
        BalanceView {
            balance,
            debtor,
            creditor,
            summary,
        }
    }
}

#[derive(Serialize, ToSchema, Debug)]
pub struct BalancesResponse {
    pub party_a: String,
    pub party_b: String,
    pub balances: Vec<BalanceView>,
}

// Error response struct
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
#[derive(Debug)]
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LedgerError::InvalidInput(..) | LedgerError::UnknownParty(_) => StatusCode::BAD_REQUEST,
            LedgerError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            LedgerError::StorageError(_)
            | LedgerError::LoggingError(_)
            | LedgerError::CacheError(_)
            | LedgerError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match self.0 {
            LedgerError::InvalidInput(field, detail) => {
                format!("Invalid input for {}: {}", field, detail.description)
            }
            LedgerError::UnknownParty(name) => format!("Unknown party: {}", name),
            other => other.to_string(),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", error_message);
        }
        (status, Json(ErrorResponse { error: error_message })).into_response()
    }
}

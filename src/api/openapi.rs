use utoipa::OpenApi;

use crate::{
    api::models::{BalanceView, BalancesResponse, ErrorResponse, UpdateSettingsRequest},
    core::models::{
        AppLog, CurrencyBalance, Ledger, NewTransaction, Settings, Settlement, SettlementDirection, SplitRatio,
        Transaction, TransactionRecord,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_transactions,
        super::handlers::record_transaction,
        super::handlers::get_balances,
        super::handlers::get_balance,
        super::handlers::get_settings,
        super::handlers::update_settings,
        super::handlers::get_app_logs
    ),
    components(schemas(
        UpdateSettingsRequest,
        BalanceView,
        BalancesResponse,
        ErrorResponse,
        NewTransaction,
        TransactionRecord,
        Transaction,
        Ledger,
        CurrencyBalance,
        Settlement,
        SettlementDirection,
        Settings,
        SplitRatio,
        AppLog
    )),
    info(
        title = "Duo Ledger API",
        description = "API for recording shared expenses between two people and settling balances per currency",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

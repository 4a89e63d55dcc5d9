use crate::core::constants::{
    BALANCES_QUERIED, CATEGORIES_SHEET, CONFIG_HEADERS, CONFIG_SHEET, DEFAULT_BASE_CURRENCY, SETTINGS_SAVED,
    SHEETS_BOOTSTRAPPED, TRANSACTION_RECORDED, TRANSACTIONS_SHEET,
};
use crate::core::dispatcher::{balance_for_currency, balances_by_currency};
use crate::core::errors::LedgerError;
use crate::core::models::{
    AppLog, CurrencyBalance, Ledger, NewTransaction, Parties, Settings, TransactionRecord,
};
use crate::core::normalizer::normalize;
use crate::core::record::validate_split;
use crate::core::settings::{category_rows, config_rows, parse_settings};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::cache::cache_keys::sheet_key;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::{Storage, canonical_headers};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// Deployment-level knobs of a [`LedgerService`].
#[derive(Clone, Debug)]
pub struct LedgerOptions {
    pub parties: Parties,
    pub base_currency: String,
    /// Currencies always present in `balances()`, even without transactions.
    pub report_currencies: Vec<String>,
    pub transactions_ttl: Duration,
    pub settings_ttl: Duration,
}

impl Default for LedgerOptions {
    fn default() -> Self {
        LedgerOptions {
            parties: Parties::new("Juan", "Mailu"),
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            report_currencies: vec![DEFAULT_BASE_CURRENCY.to_string(), "USD".to_string()],
            transactions_ttl: Duration::from_secs(60),
            settings_ttl: Duration::from_secs(300),
        }
    }
}

pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    options: LedgerOptions,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C, options: LedgerOptions) -> Self {
        LedgerService {
            storage,
            logging,
            cache,
            options,
        }
    }

    pub fn parties(&self) -> &Parties {
        &self.options.parties
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Provisions the sheets the ledger needs. Existing content is kept.
    pub async fn bootstrap(&self) -> Result<(), LedgerError> {
        self.storage
            .ensure_headers(TRANSACTIONS_SHEET, &canonical_headers())
            .await?;
        let config_headers: Vec<String> = CONFIG_HEADERS.iter().map(|h| h.to_string()).collect();
        self.storage.ensure_headers(CONFIG_SHEET, &config_headers).await?;

        let mut seeded_categories = false;
        if self.storage.read_sheet(CATEGORIES_SHEET).await?.is_empty() {
            self.storage
                .replace_sheet(CATEGORIES_SHEET, category_rows(&Settings::default()))
                .await?;
            seeded_categories = true;
        }

        info!("Sheets ready (categories seeded: {})", seeded_categories);
        self.logging
            .log_action(
                SHEETS_BOOTSTRAPPED,
                json!({ "seeded_categories": seeded_categories }),
                None,
            )
            .await?;
        Ok(())
    }

    async fn cached_sheet(&self, sheet: &str, ttl: Duration) -> Result<Vec<Vec<String>>, LedgerError> {
        let key = sheet_key(sheet);
        if let Some(values) = self.cache.get_sheet(&key).await? {
            debug!("Cache hit for {}", key);
            return Ok(values);
        }
        let values = self.storage.read_sheet(sheet).await?;
        self.cache.save_sheet(&key, &values, ttl).await?;
        Ok(values)
    }

    pub async fn load_settings(&self) -> Result<Settings, LedgerError> {
        let config = self.cached_sheet(CONFIG_SHEET, self.options.settings_ttl).await?;
        let categories = self.cached_sheet(CATEGORIES_SHEET, self.options.settings_ttl).await?;
        Ok(parse_settings(&config, &categories))
    }

    pub async fn load_ledger(&self) -> Result<Ledger, LedgerError> {
        let values = self
            .cached_sheet(TRANSACTIONS_SHEET, self.options.transactions_ttl)
            .await?;
        Ok(normalize(&values, &self.options.base_currency, &self.options.parties))
    }

    /// Balance of one currency, computed only from transactions in that currency.
    pub async fn balance(&self, currency: &str) -> Result<CurrencyBalance, LedgerError> {
        let currency = currency.trim();
        if currency.is_empty() {
            return Err(LedgerError::invalid_input(
                "currency",
                "Invalid Currency",
                "Currency cannot be empty",
            ));
        }
        let settings = self.load_settings().await?;
        let ledger = self.load_ledger().await?;
        let balance = balance_for_currency(
            &ledger,
            currency,
            &settings.default_split,
            &self.options.parties,
            &self.options.base_currency,
        );
        self.logging
            .log_action(BALANCES_QUERIED, json!({ "currencies": [currency] }), None)
            .await?;
        Ok(balance)
    }

    /// Balances of the report currencies followed by any other currency in use.
    pub async fn balances(&self) -> Result<Vec<CurrencyBalance>, LedgerError> {
        let settings = self.load_settings().await?;
        let ledger = self.load_ledger().await?;
        let balances = balances_by_currency(
            &ledger,
            &settings.default_split,
            &self.options.parties,
            &self.options.base_currency,
            &self.options.report_currencies,
        );
        let currencies: Vec<&str> = balances.iter().map(|b| b.currency.as_str()).collect();
        self.logging
            .log_action(BALANCES_QUERIED, json!({ "currencies": currencies }), None)
            .await?;
        Ok(balances)
    }

    /// Appends a transaction. Nothing is cached or logged unless the append succeeds.
    pub async fn record_transaction(&self, new: NewTransaction) -> Result<TransactionRecord, LedgerError> {
        let settings = self.load_settings().await?;
        let record = new.into_record(
            &settings.default_split,
            &self.options.parties,
            &self.options.base_currency,
        )?;
        self.storage.append_transaction(&record).await?;
        self.cache.invalidate(&sheet_key(TRANSACTIONS_SHEET)).await?;

        info!(
            "Recorded {} {} paid by {}",
            record.get("amount").unwrap_or_default(),
            record.get("currency").unwrap_or_default(),
            record.get("paid_by").unwrap_or_default()
        );
        self.logging
            .log_action(
                TRANSACTION_RECORDED,
                json!({
                    "paid_by": record.get("paid_by"),
                    "paid_for": record.get("paid_for"),
                    "type": record.get("type"),
                    "currency": record.get("currency"),
                    "amount": record.get("amount"),
                }),
                record.get("entry_user"),
            )
            .await?;
        Ok(record)
    }

    /// Rewrites the config and categories sheets wholesale.
    pub async fn save_settings(&self, settings: Settings, saved_by: Option<&str>) -> Result<Settings, LedgerError> {
        validate_split(&settings.default_split)?;
        let categories: Vec<String> = settings
            .categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();
        if categories.is_empty() {
            return Err(LedgerError::invalid_input(
                "categories",
                "Invalid Categories",
                "At least one category is required",
            ));
        }
        let settings = Settings {
            default_split: settings.default_split,
            categories,
        };

        self.storage.replace_sheet(CONFIG_SHEET, config_rows(&settings)).await?;
        self.storage
            .replace_sheet(CATEGORIES_SHEET, category_rows(&settings))
            .await?;
        self.cache.invalidate(&sheet_key(CONFIG_SHEET)).await?;
        self.cache.invalidate(&sheet_key(CATEGORIES_SHEET)).await?;

        self.logging
            .log_action(
                SETTINGS_SAVED,
                json!({
                    "split_a": settings.default_split.a,
                    "split_b": settings.default_split.b,
                    "categories": settings.categories.len(),
                }),
                saved_by,
            )
            .await?;
        Ok(settings)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}

use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::constants::DEFAULT_BASE_CURRENCY;
use crate::core::models::Parties;
use crate::core::services::LedgerOptions;
use crate::infrastructure::storage::retry::RetryPolicy;

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub log_level: String,
    /// Directory of CSV sheets; sheets live in memory when unset.
    pub data_dir: Option<PathBuf>,
    pub base_currency: String,
    pub report_currencies: Vec<String>,
    pub party_a: String,
    pub party_b: String,
    pub transactions_ttl_secs: u64,
    pub settings_ttl_secs: u64,
    pub storage_retry_attempts: u32,
    pub storage_retry_delay_ms: u64,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_currency_list(raw: &str) -> Vec<String> {
    let mut currencies: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        if !currencies.iter().any(|c| c == code) {
            currencies.push(code.to_string());
        }
    }
    currencies
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();

        Self {
            port: parsed_or("PORT", 3000),
            log_level: var_or("LOG_LEVEL", "info"),
            data_dir: env::var("DATA_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            base_currency: var_or("BASE_CURRENCY", DEFAULT_BASE_CURRENCY),
            report_currencies: parse_currency_list(&var_or("REPORT_CURRENCIES", "ARS,USD")),
            party_a: var_or("PARTY_A", "Juan"),
            party_b: var_or("PARTY_B", "Mailu"),
            transactions_ttl_secs: parsed_or("TRANSACTIONS_TTL_SECS", 60),
            settings_ttl_secs: parsed_or("SETTINGS_TTL_SECS", 300),
            storage_retry_attempts: parsed_or("STORAGE_RETRY_ATTEMPTS", 3),
            storage_retry_delay_ms: parsed_or("STORAGE_RETRY_DELAY_MS", 600),
        }
    }

    pub fn ledger_options(&self) -> LedgerOptions {
        LedgerOptions {
            parties: Parties::new(self.party_a.clone(), self.party_b.clone()),
            base_currency: self.base_currency.clone(),
            report_currencies: self.report_currencies.clone(),
            transactions_ttl: Duration::from_secs(self.transactions_ttl_secs),
            settings_ttl: Duration::from_secs(self.settings_ttl_secs),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.storage_retry_attempts,
            Duration::from_millis(self.storage_retry_delay_ms),
        )
    }
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

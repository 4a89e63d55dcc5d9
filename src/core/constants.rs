// Sheet names
pub const TRANSACTIONS_SHEET: &str = "transactions";
pub const CONFIG_SHEET: &str = "config";
pub const CATEGORIES_SHEET: &str = "categories";

// Transaction columns
pub const COL_TIMESTAMP: &str = "timestamp";
pub const COL_ENTRY_USER: &str = "entry_user";
pub const COL_PAID_BY: &str = "paid_by";
pub const COL_PAID_FOR: &str = "paid_for";
pub const COL_TYPE: &str = "type";
pub const COL_CATEGORY: &str = "category";
pub const COL_CURRENCY: &str = "currency";
pub const COL_AMOUNT: &str = "amount";
pub const COL_NOTES: &str = "notes";
pub const COL_SPLIT_A: &str = "split_a";
pub const COL_SPLIT_B: &str = "split_b";
pub const COL_AMOUNT_A: &str = "amount_a";
pub const COL_AMOUNT_B: &str = "amount_b";

pub const TX_HEADERS: [&str; 13] = [
    COL_TIMESTAMP,
    COL_ENTRY_USER,
    COL_PAID_BY,
    COL_PAID_FOR,
    COL_TYPE,
    COL_CATEGORY,
    COL_CURRENCY,
    COL_AMOUNT,
    COL_NOTES,
    COL_SPLIT_A,
    COL_SPLIT_B,
    COL_AMOUNT_A,
    COL_AMOUNT_B,
];

pub const CONFIG_HEADERS: [&str; 2] = ["key", "value"];
pub const CONFIG_KEY_SPLIT_A: &str = "split_a";
pub const CONFIG_KEY_SPLIT_B: &str = "split_b";
pub const LEGACY_CONFIG_KEY_SPLIT_A: &str = "split_juan";
pub const LEGACY_CONFIG_KEY_SPLIT_B: &str = "split_mailu";

// Categorical values, compared case-insensitively
pub const PAID_FOR_BOTH: &str = "both";
pub const LEGACY_PAID_FOR_BOTH: &str = "ambos";
pub const TYPE_EXPENSE: &str = "expense";
pub const LEGACY_TYPE_EXPENSE: &str = "gasto";

// Defaults
pub const DEFAULT_SPLIT_A: f64 = 0.6;
pub const DEFAULT_SPLIT_B: f64 = 0.4;
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Ingresos", "Supermercado", "Comidas"];
pub const DEFAULT_BASE_CURRENCY: &str = "ARS";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Net balances closer to zero than this are reported as settled.
pub const SETTLEMENT_EPSILON: f64 = 1e-9;

// Action log names
pub const TRANSACTION_RECORDED: &str = "TRANSACTION_RECORDED";
pub const BALANCES_QUERIED: &str = "BALANCES_QUERIED";
pub const SETTINGS_SAVED: &str = "SETTINGS_SAVED";
pub const SHEETS_BOOTSTRAPPED: &str = "SHEETS_BOOTSTRAPPED";

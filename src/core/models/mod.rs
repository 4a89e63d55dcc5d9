pub mod audit;
pub mod balance;
pub mod cell;
pub mod party;
pub mod record;
pub mod settings;
pub mod transaction;

pub use audit::AppLog;
pub use balance::{CurrencyBalance, DebtSummary, Settlement, SettlementDirection};
pub use cell::{Cell, ColumnKind};
pub use party::{Beneficiary, Parties, Party};
pub use record::{NewTransaction, TransactionRecord};
pub use settings::{Settings, SplitRatio};
pub use transaction::{Ledger, Transaction};

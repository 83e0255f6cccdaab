use uuid::Uuid;

pub use categories::{CategoryRegistry, DEFAULT_EXPENSE_CATEGORIES, DEFAULT_INCOME_CATEGORIES};
pub use companies::{Company, CompanyFields};
pub use error::EngineError;
pub use fixed_expenses::{
    FixedExpense, FixedExpenseCategory, FixedExpenseFields, MAX_DUE_DAY, MIN_DUE_DAY,
};
pub use ledger::Ledger;
pub use money::MoneyCents;
pub use obligation::Obligation;
pub use ops::{Engine, EngineBuilder, RecordKind};
pub use payables::{Payable, PayableFields, PayableStatus};
pub use receivables::{Receivable, ReceivableFields, ReceivableStatus};
pub use session::{CredentialVerifier, SessionGate, Sha256Credential};
pub use snapshot::Snapshot;
pub use transactions::{Transaction, TransactionKind, TransactionNew, TransactionUpdate};
pub use views::{
    AMOUNT_PAID_CATEGORY, AMOUNT_RECEIVED_CATEGORY, CompanyRanking, CompanyTotals, DerivedViews,
    MONTHLY_WINDOW, MonthlyBucket, RANKING_SIZE, StatementLine, StatementSource, Totals,
    WorkingCapital, company_ranking, monthly_series, search_companies, search_obligations,
    search_statement, statement, totals, working_capital,
};

mod categories;
mod companies;
mod error;
pub mod export;
mod fixed_expenses;
mod ledger;
mod money;
mod obligation;
mod ops;
mod payables;
mod receivables;
mod session;
mod snapshot;
mod transactions;
mod util;
mod views;

type ResultEngine<T> = Result<T, EngineError>;

/// Records addressable by their primary key.
pub trait Keyed {
    fn id(&self) -> Uuid;
}

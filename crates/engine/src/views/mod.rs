//! Derived views.
//!
//! Every function here is pure: it reads record slices and returns a fresh
//! value. Nothing is cached at this level; see [`crate::Ledger`] for the
//! memoized entry point.

use chrono::NaiveDate;
use serde::Serialize;

use crate::{EngineError, MoneyCents, ResultEngine, Snapshot};

mod monthly;
mod ranking;
mod search;
mod statement;
mod totals;
mod working_capital;

pub use monthly::{MONTHLY_WINDOW, MonthlyBucket, monthly_series};
pub use ranking::{CompanyRanking, CompanyTotals, RANKING_SIZE, company_ranking};
pub(crate) use search::display_date;
pub use search::{search_companies, search_obligations};
pub use statement::{
    AMOUNT_PAID_CATEGORY, AMOUNT_RECEIVED_CATEGORY, StatementLine, StatementSource,
    search_statement, statement,
};
pub use totals::{Totals, totals};
pub use working_capital::{WorkingCapital, working_capital};

/// All dashboard views computed from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DerivedViews {
    pub totals: Totals,
    pub monthly: Vec<MonthlyBucket>,
    pub ranking: CompanyRanking,
    pub working_capital: WorkingCapital,
}

impl DerivedViews {
    /// Compute every view for `snapshot` with `today` as reference date.
    pub fn compute(snapshot: &Snapshot, today: NaiveDate) -> ResultEngine<Self> {
        Ok(Self {
            totals: totals(
                &snapshot.transactions,
                &snapshot.receivables,
                &snapshot.payables,
            )?,
            monthly: monthly_series(
                &snapshot.transactions,
                &snapshot.receivables,
                &snapshot.payables,
                today,
            )?,
            ranking: company_ranking(&snapshot.transactions, &snapshot.companies)?,
            working_capital: working_capital(
                &snapshot.transactions,
                &snapshot.receivables,
                &snapshot.payables,
                &snapshot.fixed_expenses,
            )?,
        })
    }
}

/// Checked sum of amounts.
pub(crate) fn sum<I>(amounts: I) -> ResultEngine<MoneyCents>
where
    I: IntoIterator<Item = MoneyCents>,
{
    amounts
        .into_iter()
        .try_fold(MoneyCents::ZERO, |acc, amount| checked_add(acc, amount))
}

pub(crate) fn checked_add(lhs: MoneyCents, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
    lhs.checked_add(rhs)
        .ok_or_else(|| EngineError::InvalidAmount("total out of range".to_string()))
}

pub(crate) fn checked_sub(lhs: MoneyCents, rhs: MoneyCents) -> ResultEngine<MoneyCents> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| EngineError::InvalidAmount("total out of range".to_string()))
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::{
        Company, FixedExpense, FixedExpenseCategory, MoneyCents, Payable, PayableStatus,
        Receivable, ReceivableStatus, Transaction, TransactionKind,
    };

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn tx(kind: TransactionKind, cents: i64, on: NaiveDate) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            kind,
            amount: MoneyCents::new(cents),
            category: "Other".to_string(),
            description: None,
            date: on,
            company_id: None,
        }
    }

    pub(crate) fn income(cents: i64) -> Transaction {
        tx(TransactionKind::Income, cents, date(2024, 1, 15))
    }

    pub(crate) fn expense(cents: i64) -> Transaction {
        tx(TransactionKind::Expense, cents, date(2024, 1, 15))
    }

    pub(crate) fn receivable(status: ReceivableStatus, cents: i64, due: NaiveDate) -> Receivable {
        Receivable {
            id: Uuid::new_v4(),
            description: "Invoice".to_string(),
            amount: MoneyCents::new(cents),
            due_date: due,
            company_id: None,
            status,
            notes: None,
        }
    }

    pub(crate) fn payable(status: PayableStatus, cents: i64, due: NaiveDate) -> Payable {
        Payable {
            id: Uuid::new_v4(),
            description: "Bill".to_string(),
            amount: MoneyCents::new(cents),
            due_date: due,
            company_id: None,
            status,
            notes: None,
        }
    }

    pub(crate) fn fixed(cents: i64, is_active: bool) -> FixedExpense {
        FixedExpense {
            id: Uuid::new_v4(),
            description: "Rent".to_string(),
            amount: MoneyCents::new(cents),
            due_day: 5,
            category: FixedExpenseCategory::Rent,
            is_active,
            notes: None,
        }
    }

    pub(crate) fn company(name: &str) -> Company {
        Company {
            id: Uuid::new_v4(),
            name: name.to_string(),
            segment: "Services".to_string(),
            location: "Recife".to_string(),
            email: None,
            phone: None,
            notes: None,
        }
    }
}

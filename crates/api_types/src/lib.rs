//! Wire types for the Ledgerdash HTTP API.
//!
//! Amounts are sent as decimal text (`"1234.56"` or `"1234,56"`) and returned
//! as integer cents in `*_minor` fields. Dates are `YYYY-MM-DD`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional `?q=` filter for list endpoints.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub mod company {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyInput {
        pub name: String,
        pub segment: String,
        pub location: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyView {
        pub id: Uuid,
        pub name: String,
        pub segment: String,
        pub location: String,
        pub email: Option<String>,
        pub phone: Option<String>,
        pub notes: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub kind: TransactionKind,
        pub amount: String,
        pub category: String,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub company_id: Option<Uuid>,
    }

    /// The kind of a transaction is fixed at creation.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub amount: String,
        pub category: String,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub company_id: Option<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category: String,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub company_id: Option<Uuid>,
    }
}

pub mod receivable {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ReceivableStatus {
        #[default]
        Pending,
        Scheduled,
        Partial,
        Received,
        Overdue,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceivableInput {
        pub description: String,
        pub amount: String,
        pub due_date: NaiveDate,
        pub company_id: Option<Uuid>,
        /// Defaults to `pending`.
        #[serde(default)]
        pub status: ReceivableStatus,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceivableStatusUpdate {
        pub status: ReceivableStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ReceivableView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub due_date: NaiveDate,
        pub company_id: Option<Uuid>,
        pub status: ReceivableStatus,
        pub notes: Option<String>,
    }
}

pub mod payable {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PayableStatus {
        #[default]
        Pending,
        Scheduled,
        Partial,
        Paid,
        Overdue,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayableInput {
        pub description: String,
        pub amount: String,
        pub due_date: NaiveDate,
        pub company_id: Option<Uuid>,
        #[serde(default)]
        pub status: PayableStatus,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayableStatusUpdate {
        pub status: PayableStatus,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayableView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub due_date: NaiveDate,
        pub company_id: Option<Uuid>,
        pub status: PayableStatus,
        pub notes: Option<String>,
    }
}

pub mod fixed_expense {
    use super::*;

    fn active_by_default() -> bool {
        true
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FixedExpenseInput {
        pub description: String,
        pub amount: String,
        /// Day of the month, 1 to 31.
        pub due_day: u8,
        /// One of `rent`, `water`, `electricity`, `internet`, `phone`,
        /// `employees`, `taxes`, `accountant`, `software`,
        /// `office_supplies`, `cleaning`, `maintenance`, `other`.
        pub category: String,
        #[serde(default = "active_by_default")]
        pub is_active: bool,
        pub notes: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FixedExpenseActive {
        pub is_active: bool,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FixedExpenseView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub due_day: u8,
        pub category: String,
        pub is_active: bool,
        pub notes: Option<String>,
    }
}

pub mod dashboard {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct DashboardQuery {
        /// Reference date; the server clock when absent.
        pub today: Option<NaiveDate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Totals {
        pub income_minor: i64,
        pub expenses_minor: i64,
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthlyBucket {
        /// `MM/YYYY`
        pub label: String,
        pub year: i32,
        pub month: u32,
        pub income_minor: i64,
        pub expense_minor: i64,
        pub receivable_minor: i64,
        pub payable_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyTotals {
        pub company_id: Uuid,
        pub name: String,
        pub income_minor: i64,
        pub expense_minor: i64,
        pub balance_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyRanking {
        pub top_income: Vec<CompanyTotals>,
        pub top_expenses: Vec<CompanyTotals>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WorkingCapital {
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub total_receivables_minor: i64,
        pub total_payables_minor: i64,
        pub total_fixed_expenses_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Dashboard {
        pub totals: Totals,
        pub monthly: Vec<MonthlyBucket>,
        pub ranking: CompanyRanking,
        pub working_capital: WorkingCapital,
    }
}

pub mod statement {
    use super::*;
    use crate::transaction::TransactionKind;

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct StatementQuery {
        pub q: Option<String>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum StatementSource {
        Transaction,
        Receivable,
        Payable,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatementLine {
        pub id: Uuid,
        pub source: StatementSource,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category: String,
        pub description: Option<String>,
        pub date: NaiveDate,
        pub company_id: Option<Uuid>,
        pub company_name: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Statement {
        pub lines: Vec<StatementLine>,
    }
}

pub mod category {
    use super::*;
    use crate::transaction::TransactionKind;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryNew {
        pub kind: TransactionKind,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Categories {
        pub income: Vec<String>,
        pub expense: Vec<String>,
    }
}

use serde::Serialize;

use crate::{FixedExpense, MoneyCents, Obligation, Payable, Receivable, ResultEngine, Transaction};

use super::{sum, totals};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkingCapital {
    pub total_income: MoneyCents,
    pub total_expenses: MoneyCents,
    /// Receivables still `pending`, `partial` or `scheduled`.
    pub total_receivables: MoneyCents,
    /// Payables still `pending`, `partial` or `scheduled`.
    pub total_payables: MoneyCents,
    pub total_fixed_expenses: MoneyCents,
}

/// Realized totals plus what is still expected in and out.
///
/// `overdue` obligations are excluded from the outstanding sums.
pub fn working_capital(
    transactions: &[Transaction],
    receivables: &[Receivable],
    payables: &[Payable],
    fixed_expenses: &[FixedExpense],
) -> ResultEngine<WorkingCapital> {
    let realized = totals(transactions, receivables, payables)?;

    Ok(WorkingCapital {
        total_income: realized.income,
        total_expenses: realized.expenses,
        total_receivables: sum(outstanding(receivables))?,
        total_payables: sum(outstanding(payables))?,
        total_fixed_expenses: sum(fixed_expenses
            .iter()
            .filter(|expense| expense.is_active)
            .map(|expense| expense.amount))?,
    })
}

fn outstanding<O: Obligation>(records: &[O]) -> impl Iterator<Item = MoneyCents> + '_ {
    records
        .iter()
        .filter(|record| record.is_outstanding())
        .map(Obligation::amount)
}

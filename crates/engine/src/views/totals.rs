use serde::Serialize;

use crate::{
    MoneyCents, Obligation, Payable, Receivable, ResultEngine, Transaction, TransactionKind,
};

use super::{checked_add, checked_sub, sum};

/// Realized income, realized expenses and their difference.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: MoneyCents,
    pub expenses: MoneyCents,
    pub balance: MoneyCents,
}

/// Income counts income transactions plus received receivables; expenses
/// count expense transactions plus paid payables.
pub fn totals(
    transactions: &[Transaction],
    receivables: &[Receivable],
    payables: &[Payable],
) -> ResultEngine<Totals> {
    let income = checked_add(
        transactions_of(transactions, TransactionKind::Income)?,
        sum(settled(receivables))?,
    )?;
    let expenses = checked_add(
        transactions_of(transactions, TransactionKind::Expense)?,
        sum(settled(payables))?,
    )?;

    Ok(Totals {
        income,
        expenses,
        balance: checked_sub(income, expenses)?,
    })
}

pub(super) fn transactions_of(
    transactions: &[Transaction],
    kind: TransactionKind,
) -> ResultEngine<MoneyCents> {
    sum(transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount))
}

pub(super) fn settled<O: Obligation>(records: &[O]) -> impl Iterator<Item = MoneyCents> + '_ {
    records
        .iter()
        .filter(|record| record.is_settled())
        .map(Obligation::amount)
}

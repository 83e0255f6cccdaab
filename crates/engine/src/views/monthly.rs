use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    MoneyCents, Obligation, Payable, Receivable, ResultEngine, Transaction, TransactionKind,
};

use super::checked_add;

/// Number of calendar months in the series, current month included.
pub const MONTHLY_WINDOW: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    /// `MM/YYYY`.
    pub label: String,
    pub income_total: MoneyCents,
    pub expense_total: MoneyCents,
    pub receivable_total: MoneyCents,
    pub payable_total: MoneyCents,
}

impl MonthlyBucket {
    fn empty(index: i64) -> Self {
        let (year, month) = year_month(index);
        Self {
            year,
            month,
            label: format!("{month:02}/{year}"),
            income_total: MoneyCents::ZERO,
            expense_total: MoneyCents::ZERO,
            receivable_total: MoneyCents::ZERO,
            payable_total: MoneyCents::ZERO,
        }
    }
}

/// Months since year 0, so consecutive months are consecutive integers.
fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn year_month(index: i64) -> (i32, u32) {
    // `index` always comes from `month_index` of a valid date.
    let year = index.div_euclid(12) as i32;
    let month = index.rem_euclid(12) as u32 + 1;
    (year, month)
}

/// Six monthly buckets, oldest first, ending at the month of `today`.
///
/// The window is built on year-month indices, never on day arithmetic, so a
/// reference date like 31 March yields October..March: stepping back behaves
/// as if the day were clamped to the last valid day of each target month.
///
/// - transactions add to income/expense by their date;
/// - receivables not yet received add to `receivable_total` by due date;
/// - payables not yet paid add to `payable_total` by due date.
///
/// Records outside the window are dropped.
pub fn monthly_series(
    transactions: &[Transaction],
    receivables: &[Receivable],
    payables: &[Payable],
    today: NaiveDate,
) -> ResultEngine<Vec<MonthlyBucket>> {
    let last = month_index(today);
    let first = last - (MONTHLY_WINDOW as i64 - 1);
    let mut buckets: Vec<MonthlyBucket> = (first..=last).map(MonthlyBucket::empty).collect();

    let slot = |date: NaiveDate| -> Option<usize> {
        let index = month_index(date);
        (first..=last)
            .contains(&index)
            .then(|| (index - first) as usize)
    };

    for tx in transactions {
        let Some(idx) = slot(tx.date) else { continue };
        let bucket = &mut buckets[idx];
        match tx.kind {
            TransactionKind::Income => {
                bucket.income_total = checked_add(bucket.income_total, tx.amount)?
            }
            TransactionKind::Expense => {
                bucket.expense_total = checked_add(bucket.expense_total, tx.amount)?
            }
        }
    }

    for receivable in receivables.iter().filter(|r| !r.is_settled()) {
        let Some(idx) = slot(receivable.due_date) else { continue };
        let bucket = &mut buckets[idx];
        bucket.receivable_total = checked_add(bucket.receivable_total, receivable.amount)?;
    }

    for payable in payables.iter().filter(|p| !p.is_settled()) {
        let Some(idx) = slot(payable.due_date) else { continue };
        let bucket = &mut buckets[idx];
        bucket.payable_total = checked_add(bucket.payable_total, payable.amount)?;
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        PayableStatus, ReceivableStatus,
        views::fixtures::{date, payable, receivable, tx},
    };

    fn labels(buckets: &[MonthlyBucket]) -> Vec<&str> {
        buckets.iter().map(|b| b.label.as_str()).collect()
    }

    #[test]
    fn empty_input_yields_six_zero_buckets() {
        let buckets = monthly_series(&[], &[], &[], date(2024, 6, 15)).unwrap();

        assert_eq!(buckets.len(), MONTHLY_WINDOW);
        assert_eq!(
            labels(&buckets),
            ["01/2024", "02/2024", "03/2024", "04/2024", "05/2024", "06/2024"]
        );
        assert!(buckets.iter().all(|b| b.income_total.is_zero()
            && b.expense_total.is_zero()
            && b.receivable_total.is_zero()
            && b.payable_total.is_zero()));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let buckets = monthly_series(&[], &[], &[], date(2024, 2, 1)).unwrap();
        assert_eq!(
            labels(&buckets),
            ["09/2023", "10/2023", "11/2023", "12/2023", "01/2024", "02/2024"]
        );
    }

    #[test]
    fn end_of_month_reference_does_not_skip_short_months() {
        let from_31_march = monthly_series(&[], &[], &[], date(2024, 3, 31)).unwrap();
        assert_eq!(
            labels(&from_31_march),
            ["10/2023", "11/2023", "12/2023", "01/2024", "02/2024", "03/2024"]
        );

        let from_leap_day = monthly_series(&[], &[], &[], date(2024, 2, 29)).unwrap();
        assert_eq!(from_leap_day.first().map(|b| b.label.as_str()), Some("09/2023"));

        let from_31_august = monthly_series(&[], &[], &[], date(2023, 8, 31)).unwrap();
        assert_eq!(
            labels(&from_31_august),
            ["03/2023", "04/2023", "05/2023", "06/2023", "07/2023", "08/2023"]
        );
    }

    #[test]
    fn records_are_bucketed_and_out_of_window_dropped() {
        let today = date(2024, 6, 10);
        let transactions = vec![
            tx(TransactionKind::Income, 1_000, date(2024, 6, 1)),
            tx(TransactionKind::Expense, 300, date(2024, 6, 30)),
            tx(TransactionKind::Income, 50, date(2024, 1, 31)),
            tx(TransactionKind::Income, 9_999, date(2023, 12, 31)),
            tx(TransactionKind::Income, 9_999, date(2024, 7, 1)),
        ];
        let receivables = vec![
            receivable(ReceivableStatus::Pending, 200, date(2024, 5, 20)),
            receivable(ReceivableStatus::Received, 7_777, date(2024, 5, 20)),
            receivable(ReceivableStatus::Overdue, 25, date(2024, 5, 2)),
        ];
        let payables = vec![
            payable(PayableStatus::Partial, 400, date(2024, 3, 3)),
            payable(PayableStatus::Paid, 8_888, date(2024, 3, 3)),
            payable(PayableStatus::Pending, 8_888, date(2023, 1, 3)),
        ];

        let buckets = monthly_series(&transactions, &receivables, &payables, today).unwrap();

        let june = &buckets[5];
        assert_eq!(june.income_total, MoneyCents::new(1_000));
        assert_eq!(june.expense_total, MoneyCents::new(300));
        assert_eq!(buckets[0].income_total, MoneyCents::new(50));
        assert_eq!(buckets[4].receivable_total, MoneyCents::new(225));
        assert_eq!(buckets[2].payable_total, MoneyCents::new(400));

        let total_income: i64 = buckets.iter().map(|b| b.income_total.cents()).sum();
        assert_eq!(total_income, 1_050);
    }
}

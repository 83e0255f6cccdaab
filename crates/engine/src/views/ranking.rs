use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{Company, MoneyCents, ResultEngine, Transaction, TransactionKind};

use super::{checked_add, checked_sub};

/// Entries kept in each ranking.
pub const RANKING_SIZE: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CompanyTotals {
    pub company_id: Uuid,
    pub name: String,
    pub income_total: MoneyCents,
    pub expense_total: MoneyCents,
    pub balance: MoneyCents,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CompanyRanking {
    pub top_income: Vec<CompanyTotals>,
    pub top_expenses: Vec<CompanyTotals>,
}

/// Per-company transaction totals, ranked by income and by expenses.
///
/// Companies with no movement at all are left out. Transactions without a
/// company, or pointing at an unknown one, do not count. Ties keep the order
/// of `companies`.
pub fn company_ranking(
    transactions: &[Transaction],
    companies: &[Company],
) -> ResultEngine<CompanyRanking> {
    let mut rows: Vec<CompanyTotals> = Vec::with_capacity(companies.len());
    let mut index: HashMap<Uuid, usize> = HashMap::with_capacity(companies.len());
    for company in companies {
        if index.contains_key(&company.id) {
            continue;
        }
        index.insert(company.id, rows.len());
        rows.push(CompanyTotals {
            company_id: company.id,
            name: company.name.clone(),
            income_total: MoneyCents::ZERO,
            expense_total: MoneyCents::ZERO,
            balance: MoneyCents::ZERO,
        });
    }

    for tx in transactions {
        let Some(&idx) = tx.company_id.as_ref().and_then(|id| index.get(id)) else {
            continue;
        };
        let row = &mut rows[idx];
        match tx.kind {
            TransactionKind::Income => {
                row.income_total = checked_add(row.income_total, tx.amount)?;
                row.balance = checked_add(row.balance, tx.amount)?;
            }
            TransactionKind::Expense => {
                row.expense_total = checked_add(row.expense_total, tx.amount)?;
                row.balance = checked_sub(row.balance, tx.amount)?;
            }
        }
    }

    rows.retain(|row| !(row.income_total.is_zero() && row.expense_total.is_zero()));

    // `sort_by` is stable, which keeps ties in company order.
    let mut top_income = rows.clone();
    top_income.sort_by(|a, b| b.income_total.cmp(&a.income_total));
    top_income.truncate(RANKING_SIZE);

    let mut top_expenses = rows;
    top_expenses.sort_by(|a, b| b.expense_total.cmp(&a.expense_total));
    top_expenses.truncate(RANKING_SIZE);

    Ok(CompanyRanking {
        top_income,
        top_expenses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::{company, expense, income};

    fn for_company(mut tx: Transaction, company: &Company) -> Transaction {
        tx.company_id = Some(company.id);
        tx
    }

    #[test]
    fn idle_companies_are_excluded() {
        let a = company("A");
        let b = company("B");
        let transactions = vec![for_company(income(50_000), &a)];

        let ranking = company_ranking(&transactions, &[a.clone(), b.clone()]).unwrap();

        assert_eq!(ranking.top_income.len(), 1);
        assert_eq!(ranking.top_income[0].company_id, a.id);
        assert_eq!(ranking.top_income[0].income_total, MoneyCents::new(50_000));
        assert!(
            ranking
                .top_income
                .iter()
                .chain(&ranking.top_expenses)
                .all(|row| row.company_id != b.id)
        );
    }

    #[test]
    fn balance_is_income_minus_expenses() {
        let a = company("A");
        let transactions = vec![
            for_company(income(1_000), &a),
            for_company(expense(1_500), &a),
            income(99_999),
        ];

        let ranking = company_ranking(&transactions, &[a.clone()]).unwrap();
        let row = &ranking.top_expenses[0];

        assert_eq!(row.income_total, MoneyCents::new(1_000));
        assert_eq!(row.expense_total, MoneyCents::new(1_500));
        assert_eq!(row.balance, MoneyCents::new(-500));
    }

    #[test]
    fn ranking_keeps_top_five_and_stable_ties() {
        let companies: Vec<Company> = (0..7).map(|i| company(&format!("C{i}"))).collect();
        let mut transactions = Vec::new();
        for (i, c) in companies.iter().enumerate() {
            // C0 and C1 tie on income; C6 earns most.
            let cents = match i {
                0 | 1 => 500,
                6 => 10_000,
                other => other as i64 * 10,
            };
            transactions.push(for_company(income(cents), c));
        }
        transactions.push(for_company(expense(1), &companies[3]));

        let ranking = company_ranking(&transactions, &companies).unwrap();
        let names: Vec<&str> = ranking.top_income.iter().map(|r| r.name.as_str()).collect();

        assert_eq!(names, ["C6", "C0", "C1", "C5", "C4"]);
        assert_eq!(ranking.top_expenses.len(), RANKING_SIZE);
        assert_eq!(ranking.top_expenses[0].name, "C3");
        // The remaining expense slots are zero-expense ties in company order.
        let rest: Vec<&str> = ranking.top_expenses[1..]
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(rest, ["C0", "C1", "C2", "C4"]);
    }

    #[test]
    fn unknown_company_reference_is_ignored() {
        let a = company("A");
        let mut orphan = income(700);
        orphan.company_id = Some(Uuid::new_v4());

        let ranking = company_ranking(&[orphan], &[a]).unwrap();
        assert_eq!(ranking, CompanyRanking::default());
    }
}

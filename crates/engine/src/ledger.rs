//! In-memory record collections with memoized derived views.
//!
//! The `Ledger` is what a consumer keeps after loading a [`Snapshot`] from
//! the store. Every mutator bumps the version of the collection it touches;
//! [`Ledger::views`] recomputes only when a version or the reference month
//! changed since the last call.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::{
    Company, DerivedViews, FixedExpense, Keyed, Payable, Receivable, ResultEngine, Snapshot,
    Transaction,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Versions {
    companies: u64,
    transactions: u64,
    receivables: u64,
    payables: u64,
    fixed_expenses: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheKey {
    versions: Versions,
    year: i32,
    month: u32,
}

#[derive(Debug, Default)]
pub struct Ledger {
    snapshot: Snapshot,
    versions: Versions,
    cache: Option<(CacheKey, DerivedViews)>,
    computations: u64,
}

/// Replace the record with the same id, or append it.
fn upsert<T: Keyed>(records: &mut Vec<T>, record: T) {
    match records.iter().position(|r| r.id() == record.id()) {
        Some(idx) => records[idx] = record,
        None => records.push(record),
    }
}

fn remove<T: Keyed>(records: &mut Vec<T>, id: Uuid) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

impl Ledger {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ..Default::default()
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// How many times the views were actually computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Derived views for `today`, from cache when nothing changed.
    ///
    /// A failed computation is not cached.
    pub fn views(&mut self, today: NaiveDate) -> ResultEngine<&DerivedViews> {
        let key = CacheKey {
            versions: self.versions,
            year: today.year(),
            month: today.month(),
        };

        let views = match self.cache.take() {
            Some((cached, views)) if cached == key => views,
            _ => {
                let views = DerivedViews::compute(&self.snapshot, today)?;
                self.computations += 1;
                views
            }
        };

        let (_, views) = self.cache.insert((key, views));
        Ok(views)
    }

    /// Swap every collection at once, e.g. after a reload.
    pub fn replace(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        self.versions.companies += 1;
        self.versions.transactions += 1;
        self.versions.receivables += 1;
        self.versions.payables += 1;
        self.versions.fixed_expenses += 1;
    }

    pub fn upsert_company(&mut self, company: Company) {
        upsert(&mut self.snapshot.companies, company);
        self.versions.companies += 1;
    }

    pub fn remove_company(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.snapshot.companies, id);
        if removed {
            self.versions.companies += 1;
        }
        removed
    }

    pub fn upsert_transaction(&mut self, transaction: Transaction) {
        upsert(&mut self.snapshot.transactions, transaction);
        self.versions.transactions += 1;
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.snapshot.transactions, id);
        if removed {
            self.versions.transactions += 1;
        }
        removed
    }

    pub fn upsert_receivable(&mut self, receivable: Receivable) {
        upsert(&mut self.snapshot.receivables, receivable);
        self.versions.receivables += 1;
    }

    pub fn remove_receivable(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.snapshot.receivables, id);
        if removed {
            self.versions.receivables += 1;
        }
        removed
    }

    pub fn upsert_payable(&mut self, payable: Payable) {
        upsert(&mut self.snapshot.payables, payable);
        self.versions.payables += 1;
    }

    pub fn remove_payable(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.snapshot.payables, id);
        if removed {
            self.versions.payables += 1;
        }
        removed
    }

    pub fn upsert_fixed_expense(&mut self, expense: FixedExpense) {
        upsert(&mut self.snapshot.fixed_expenses, expense);
        self.versions.fixed_expenses += 1;
    }

    pub fn remove_fixed_expense(&mut self, id: Uuid) -> bool {
        let removed = remove(&mut self.snapshot.fixed_expenses, id);
        if removed {
            self.versions.fixed_expenses += 1;
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        MoneyCents,
        views::fixtures::{company, date, expense, fixed, income},
    };

    #[test]
    fn views_are_cached_until_a_collection_changes() {
        let mut ledger = Ledger::new(Snapshot {
            transactions: vec![income(1_000)],
            ..Default::default()
        });
        let today = date(2024, 1, 20);

        let first = ledger.views(today).unwrap().clone();
        let second = ledger.views(today).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(ledger.computations(), 1);

        ledger.upsert_transaction(expense(400));
        let third = ledger.views(today).unwrap();
        assert_eq!(third.totals.balance, MoneyCents::new(600));
        assert_eq!(ledger.computations(), 2);
    }

    #[test]
    fn replace_swaps_collections_and_invalidates_cache() {
        let mut ledger = Ledger::new(Snapshot {
            transactions: vec![income(1_000)],
            ..Default::default()
        });
        let today = date(2024, 1, 20);
        assert_eq!(
            ledger.views(today).unwrap().totals.income,
            MoneyCents::new(1_000)
        );

        ledger.replace(Snapshot {
            transactions: vec![income(2_500), expense(500)],
            ..Default::default()
        });
        let views = ledger.views(today).unwrap();
        assert_eq!(views.totals.income, MoneyCents::new(2_500));
        assert_eq!(views.totals.balance, MoneyCents::new(2_000));
        assert_eq!(ledger.computations(), 2);
        assert_eq!(ledger.snapshot().transactions.len(), 2);
    }

    #[test]
    fn new_month_invalidates_cache_but_new_day_does_not() {
        let mut ledger = Ledger::default();

        ledger.views(date(2024, 1, 1)).unwrap();
        ledger.views(date(2024, 1, 31)).unwrap();
        assert_eq!(ledger.computations(), 1);

        let views = ledger.views(date(2024, 2, 1)).unwrap();
        assert_eq!(views.monthly.last().map(|b| b.month), Some(2));
        assert_eq!(ledger.computations(), 2);
    }

    #[test]
    fn upsert_replaces_in_place_and_remove_reports_misses() {
        let mut ledger = Ledger::default();
        let mut acme = company("Acme");
        ledger.upsert_company(acme.clone());
        ledger.upsert_company(company("Beta"));

        acme.name = "Acme Ltd".to_string();
        ledger.upsert_company(acme.clone());

        let names: Vec<&str> = ledger
            .snapshot()
            .companies
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Acme Ltd", "Beta"]);

        assert!(ledger.remove_company(acme.id));
        assert!(!ledger.remove_company(acme.id));
    }

    #[test]
    fn failed_miss_does_not_bump_version() {
        let mut ledger = Ledger::new(Snapshot {
            fixed_expenses: vec![fixed(100, true)],
            ..Default::default()
        });
        ledger.views(date(2024, 5, 5)).unwrap();
        assert!(!ledger.remove_fixed_expense(Uuid::new_v4()));
        ledger.views(date(2024, 5, 5)).unwrap();
        assert_eq!(ledger.computations(), 1);
    }
}

//! The five record collections as loaded from the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Company, FixedExpense, Payable, Receivable, Transaction};

/// Every collection the views read, in store order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub companies: Vec<Company>,
    pub transactions: Vec<Transaction>,
    pub receivables: Vec<Receivable>,
    pub payables: Vec<Payable>,
    pub fixed_expenses: Vec<FixedExpense>,
}

impl Snapshot {
    /// Company names by id. With duplicate ids the first one wins.
    pub fn company_names(&self) -> HashMap<Uuid, &str> {
        let mut names = HashMap::with_capacity(self.companies.len());
        for company in &self.companies {
            names.entry(company.id).or_insert(company.name.as_str());
        }
        names
    }
}

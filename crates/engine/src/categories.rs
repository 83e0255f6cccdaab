//! Category registry for transactions.
//!
//! The registry maps each [`TransactionKind`] to an ordered set of category
//! names. It is a value: [`CategoryRegistry::add_category`] returns a new
//! registry and leaves the receiver untouched, so callers decide when (and
//! whether) to swap the shared state.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, ResultEngine, TransactionKind,
    util::{normalize_display, normalize_key},
};

pub const DEFAULT_INCOME_CATEGORIES: [&str; 2] = ["Service Provision", "Other"];
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Lodging",
    "Service Hiring",
    "Service Provision",
    "Employee",
    "Accountant",
    "Other",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegistry {
    income: Vec<String>,
    expense: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self {
            income: DEFAULT_INCOME_CATEGORIES.map(String::from).to_vec(),
            expense: DEFAULT_EXPENSE_CATEGORIES.map(String::from).to_vec(),
        }
    }
}

impl CategoryRegistry {
    /// A registry with no categories at all.
    pub fn empty() -> Self {
        Self {
            income: Vec::new(),
            expense: Vec::new(),
        }
    }

    /// Category names for `kind`, in insertion order.
    pub fn categories(&self, kind: TransactionKind) -> &[String] {
        match kind {
            TransactionKind::Income => &self.income,
            TransactionKind::Expense => &self.expense,
        }
    }

    /// Case and diacritics insensitive membership test.
    pub fn contains(&self, kind: TransactionKind, name: &str) -> bool {
        let Some(key) = normalize_key(name) else {
            return false;
        };
        self.categories(kind)
            .iter()
            .any(|existing| normalize_key(existing).as_deref() == Some(key.as_str()))
    }

    /// Return a registry that also contains `name` under `kind`.
    ///
    /// Adding a name already present (modulo case and diacritics) returns an
    /// identical registry.
    pub fn add_category(&self, kind: TransactionKind, name: &str) -> ResultEngine<Self> {
        let display = normalize_display(name)
            .ok_or_else(|| EngineError::Validation("category name must not be empty".to_string()))?;
        if normalize_key(&display).is_none() {
            return Err(EngineError::Validation(format!(
                "category name '{display}' has no letters or digits"
            )));
        }

        let mut next = self.clone();
        if next.contains(kind, &display) {
            return Ok(next);
        }
        match kind {
            TransactionKind::Income => next.income.push(display),
            TransactionKind::Expense => next.expense.push(display),
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_is_seeded() {
        let registry = CategoryRegistry::default();
        assert_eq!(registry.categories(TransactionKind::Income).len(), 2);
        assert_eq!(registry.categories(TransactionKind::Expense).len(), 8);
        assert!(registry.contains(TransactionKind::Expense, "food"));
        assert!(!registry.contains(TransactionKind::Income, "Food"));
    }

    #[test]
    fn add_returns_new_registry_and_keeps_original() {
        let original = CategoryRegistry::default();
        let next = original
            .add_category(TransactionKind::Income, "  Consulting   fees ")
            .unwrap();

        assert!(!original.contains(TransactionKind::Income, "Consulting fees"));
        assert_eq!(
            next.categories(TransactionKind::Income).last().map(String::as_str),
            Some("Consulting fees")
        );
        assert_eq!(
            next.categories(TransactionKind::Expense),
            original.categories(TransactionKind::Expense)
        );
    }

    #[test]
    fn duplicates_are_idempotent_modulo_case_and_accents() {
        let registry = CategoryRegistry::empty()
            .add_category(TransactionKind::Expense, "Alimentação")
            .unwrap();
        let again = registry
            .add_category(TransactionKind::Expense, "ALIMENTACAO")
            .unwrap();

        assert_eq!(again, registry);
        assert_eq!(again.categories(TransactionKind::Expense).len(), 1);
    }

    #[test]
    fn blank_names_are_rejected() {
        let registry = CategoryRegistry::default();
        assert!(matches!(
            registry.add_category(TransactionKind::Income, "   "),
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            registry.add_category(TransactionKind::Income, "--"),
            Err(EngineError::Validation(_))
        ));
    }
}

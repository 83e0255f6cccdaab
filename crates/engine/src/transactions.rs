//! Income and expense transactions.
//!
//! A `Transaction` is a realized movement of money. Its kind is fixed at
//! creation; edits can only touch amount, category, description, date and
//! company.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Keyed, MoneyCents, ResultEngine,
    util::{
        ensure_non_negative, format_stored_date, normalize_optional_text, normalize_required,
        parse_stored_amount, parse_stored_date,
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::MalformedRecord(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub company_id: Option<Uuid>,
}

impl Keyed for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Fields for a new transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionNew {
    pub kind: TransactionKind,
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub company_id: Option<Uuid>,
}

/// Fields accepted when editing a transaction. The kind is not among them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub amount: MoneyCents,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub company_id: Option<Uuid>,
}

impl TransactionNew {
    pub(crate) fn into_transaction(self, id: Uuid) -> ResultEngine<Transaction> {
        ensure_non_negative(self.amount, "transaction")?;
        Ok(Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            category: normalize_required(&self.category, "transaction category")?,
            description: normalize_optional_text(self.description.as_deref()),
            date: self.date,
            company_id: self.company_id,
        })
    }
}

impl TransactionUpdate {
    /// Apply the edit on top of the stored record, keeping its kind.
    pub(crate) fn apply(self, current: &Transaction) -> ResultEngine<Transaction> {
        TransactionNew {
            kind: current.kind,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
            company_id: self.company_id,
        }
        .into_transaction(current.id)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    pub date: String,
    pub company_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount: ActiveValue::Set(tx.amount.to_decimal_string()),
            category: ActiveValue::Set(tx.category.clone()),
            description: ActiveValue::Set(tx.description.clone()),
            date: ActiveValue::Set(format_stored_date(tx.date)),
            company_id: ActiveValue::Set(tx.company_id),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id.to_string();
        let kind = TransactionKind::try_from(model.kind.as_str()).map_err(|_| {
            EngineError::MalformedRecord(format!("transaction {id}: invalid type '{}'", model.kind))
        })?;
        Ok(Self {
            id: model.id,
            kind,
            amount: parse_stored_amount("transaction", &id, &model.amount)?,
            category: model.category,
            description: model.description,
            date: parse_stored_date("transaction", &id, &model.date)?,
            company_id: model.company_id,
        })
    }
}

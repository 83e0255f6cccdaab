//! Recurring monthly obligations.
//!
//! A fixed expense is due every month on `due_day`. It is toggled inactive
//! rather than deleted while temporarily suspended.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Keyed, MoneyCents, ResultEngine,
    util::{ensure_non_negative, normalize_optional_text, normalize_required, parse_stored_amount},
};

pub const MIN_DUE_DAY: u8 = 1;
pub const MAX_DUE_DAY: u8 = 31;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixedExpenseCategory {
    Rent,
    Water,
    Electricity,
    Internet,
    Phone,
    Employees,
    Taxes,
    Accountant,
    Software,
    OfficeSupplies,
    Cleaning,
    Maintenance,
    Other,
}

impl FixedExpenseCategory {
    pub const ALL: [FixedExpenseCategory; 13] = [
        Self::Rent,
        Self::Water,
        Self::Electricity,
        Self::Internet,
        Self::Phone,
        Self::Employees,
        Self::Taxes,
        Self::Accountant,
        Self::Software,
        Self::OfficeSupplies,
        Self::Cleaning,
        Self::Maintenance,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Water => "water",
            Self::Electricity => "electricity",
            Self::Internet => "internet",
            Self::Phone => "phone",
            Self::Employees => "employees",
            Self::Taxes => "taxes",
            Self::Accountant => "accountant",
            Self::Software => "software",
            Self::OfficeSupplies => "office_supplies",
            Self::Cleaning => "cleaning",
            Self::Maintenance => "maintenance",
            Self::Other => "other",
        }
    }
}

impl TryFrom<&str> for FixedExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| {
                EngineError::MalformedRecord(format!("invalid fixed expense category: {value}"))
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpense {
    pub id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub due_day: u8,
    pub category: FixedExpenseCategory,
    pub is_active: bool,
    pub notes: Option<String>,
}

impl Keyed for FixedExpense {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExpenseFields {
    pub description: String,
    pub amount: MoneyCents,
    pub due_day: u8,
    pub category: FixedExpenseCategory,
    pub is_active: bool,
    pub notes: Option<String>,
}

impl FixedExpenseFields {
    pub(crate) fn into_fixed_expense(self, id: Uuid) -> ResultEngine<FixedExpense> {
        ensure_non_negative(self.amount, "fixed expense")?;
        if !(MIN_DUE_DAY..=MAX_DUE_DAY).contains(&self.due_day) {
            return Err(EngineError::Validation(format!(
                "due day must be between {MIN_DUE_DAY} and {MAX_DUE_DAY}, got {}",
                self.due_day
            )));
        }
        Ok(FixedExpense {
            id,
            description: normalize_required(&self.description, "fixed expense description")?,
            amount: self.amount,
            due_day: self.due_day,
            category: self.category,
            is_active: self.is_active,
            notes: normalize_optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fixed_expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub amount: String,
    pub due_day: i32,
    pub category: String,
    pub is_active: bool,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&FixedExpense> for ActiveModel {
    fn from(expense: &FixedExpense) -> Self {
        Self {
            id: ActiveValue::Set(expense.id),
            description: ActiveValue::Set(expense.description.clone()),
            amount: ActiveValue::Set(expense.amount.to_decimal_string()),
            due_day: ActiveValue::Set(i32::from(expense.due_day)),
            category: ActiveValue::Set(expense.category.as_str().to_string()),
            is_active: ActiveValue::Set(expense.is_active),
            notes: ActiveValue::Set(expense.notes.clone()),
        }
    }
}

impl TryFrom<Model> for FixedExpense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id.to_string();
        let due_day = u8::try_from(model.due_day)
            .ok()
            .filter(|day| (MIN_DUE_DAY..=MAX_DUE_DAY).contains(day))
            .ok_or_else(|| {
                EngineError::MalformedRecord(format!(
                    "fixed expense {id}: invalid due day {}",
                    model.due_day
                ))
            })?;
        let category = FixedExpenseCategory::try_from(model.category.as_str()).map_err(|_| {
            EngineError::MalformedRecord(format!(
                "fixed expense {id}: invalid category '{}'",
                model.category
            ))
        })?;
        Ok(Self {
            id: model.id,
            description: model.description,
            amount: parse_stored_amount("fixed expense", &id, &model.amount)?,
            due_day,
            category,
            is_active: model.is_active,
            notes: model.notes,
        })
    }
}

//! Accounts payable.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Keyed, MoneyCents, Obligation, ResultEngine,
    util::{
        ensure_non_negative, format_stored_date, normalize_optional_text, normalize_required,
        parse_stored_amount, parse_stored_date,
    },
};

/// Payment progress of a payable. Any status can follow any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayableStatus {
    #[default]
    Pending,
    Scheduled,
    Partial,
    Paid,
    Overdue,
}

impl PayableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Partial => "partial",
            Self::Paid => "paid",
            Self::Overdue => "overdue",
        }
    }
}

impl TryFrom<&str> for PayableStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            "overdue" => Ok(Self::Overdue),
            other => Err(EngineError::MalformedRecord(format!(
                "invalid payable status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payable {
    pub id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub company_id: Option<Uuid>,
    pub status: PayableStatus,
    pub notes: Option<String>,
}

impl Keyed for Payable {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Obligation for Payable {
    fn description(&self) -> &str {
        &self.description
    }

    fn amount(&self) -> MoneyCents {
        self.amount
    }

    fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    fn company_id(&self) -> Option<Uuid> {
        self.company_id
    }

    fn is_settled(&self) -> bool {
        self.status == PayableStatus::Paid
    }

    fn is_outstanding(&self) -> bool {
        matches!(
            self.status,
            PayableStatus::Pending | PayableStatus::Partial | PayableStatus::Scheduled
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayableFields {
    pub description: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub company_id: Option<Uuid>,
    pub status: PayableStatus,
    pub notes: Option<String>,
}

impl PayableFields {
    pub(crate) fn into_payable(self, id: Uuid) -> ResultEngine<Payable> {
        ensure_non_negative(self.amount, "payable")?;
        Ok(Payable {
            id,
            description: normalize_required(&self.description, "payable description")?,
            amount: self.amount,
            due_date: self.due_date,
            company_id: self.company_id,
            status: self.status,
            notes: normalize_optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payables")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub amount: String,
    pub due_date: String,
    pub company_id: Option<Uuid>,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Payable> for ActiveModel {
    fn from(payable: &Payable) -> Self {
        Self {
            id: ActiveValue::Set(payable.id),
            description: ActiveValue::Set(payable.description.clone()),
            amount: ActiveValue::Set(payable.amount.to_decimal_string()),
            due_date: ActiveValue::Set(format_stored_date(payable.due_date)),
            company_id: ActiveValue::Set(payable.company_id),
            status: ActiveValue::Set(payable.status.as_str().to_string()),
            notes: ActiveValue::Set(payable.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Payable {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id.to_string();
        let status = PayableStatus::try_from(model.status.as_str()).map_err(|_| {
            EngineError::MalformedRecord(format!("payable {id}: invalid status '{}'", model.status))
        })?;
        Ok(Self {
            id: model.id,
            description: model.description,
            amount: parse_stored_amount("payable", &id, &model.amount)?,
            due_date: parse_stored_date("payable", &id, &model.due_date)?,
            company_id: model.company_id,
            status,
            notes: model.notes,
        })
    }
}

//! Accounts receivable.

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

/// Collection progress of a receivable. Any status can follow any other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceivableStatus {
    #[default]
    Pending,
    Scheduled,
    Partial,
    Received,
    Overdue,
}

impl ReceivableStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Scheduled => "scheduled",
            Self::Partial => "partial",
            Self::Received => "received",
            Self::Overdue => "overdue",
        }
    }
}

impl TryFrom<&str> for ReceivableStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "scheduled" => Ok(Self::Scheduled),
            "partial" => Ok(Self::Partial),
            "received" => Ok(Self::Received),
            "overdue" => Ok(Self::Overdue),
            other => Err(EngineError::MalformedRecord(format!(
                "invalid receivable status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: Uuid,
    pub description: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub company_id: Option<Uuid>,
    pub status: ReceivableStatus,
    pub notes: Option<String>,
}

impl Keyed for Receivable {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Obligation for Receivable {
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
        self.status == ReceivableStatus::Received
    }

    fn is_outstanding(&self) -> bool {
        matches!(
            self.status,
            ReceivableStatus::Pending | ReceivableStatus::Partial | ReceivableStatus::Scheduled
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivableFields {
    pub description: String,
    pub amount: MoneyCents,
    pub due_date: NaiveDate,
    pub company_id: Option<Uuid>,
    pub status: ReceivableStatus,
    pub notes: Option<String>,
}

impl ReceivableFields {
    pub(crate) fn into_receivable(self, id: Uuid) -> ResultEngine<Receivable> {
        ensure_non_negative(self.amount, "receivable")?;
        Ok(Receivable {
            id,
            description: normalize_required(&self.description, "receivable description")?,
            amount: self.amount,
            due_date: self.due_date,
            company_id: self.company_id,
            status: self.status,
            notes: normalize_optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "receivables")]
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

impl From<&Receivable> for ActiveModel {
    fn from(receivable: &Receivable) -> Self {
        Self {
            id: ActiveValue::Set(receivable.id),
            description: ActiveValue::Set(receivable.description.clone()),
            amount: ActiveValue::Set(receivable.amount.to_decimal_string()),
            due_date: ActiveValue::Set(format_stored_date(receivable.due_date)),
            company_id: ActiveValue::Set(receivable.company_id),
            status: ActiveValue::Set(receivable.status.as_str().to_string()),
            notes: ActiveValue::Set(receivable.notes.clone()),
        }
    }
}

impl TryFrom<Model> for Receivable {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id.to_string();
        let status = ReceivableStatus::try_from(model.status.as_str()).map_err(|_| {
            EngineError::MalformedRecord(format!(
                "receivable {id}: invalid status '{}'",
                model.status
            ))
        })?;
        Ok(Self {
            id: model.id,
            description: model.description,
            amount: parse_stored_amount("receivable", &id, &model.amount)?,
            due_date: parse_stored_date("receivable", &id, &model.due_date)?,
            company_id: model.company_id,
            status,
            notes: model.notes,
        })
    }
}

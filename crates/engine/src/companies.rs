//! Client companies.
//!
//! Transactions, receivables and payables may point at a company by id. The
//! reference is weak: removing a company leaves those records untouched.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Keyed, ResultEngine,
    util::{normalize_optional_text, normalize_required},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub segment: String,
    pub location: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl Keyed for Company {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Editable company fields, shared by create and update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyFields {
    pub name: String,
    pub segment: String,
    pub location: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl CompanyFields {
    /// Trim every field and reject blank required ones.
    pub(crate) fn into_company(self, id: Uuid) -> ResultEngine<Company> {
        Ok(Company {
            id,
            name: normalize_required(&self.name, "company name")?,
            segment: normalize_required(&self.segment, "company segment")?,
            location: normalize_required(&self.location, "company location")?,
            email: normalize_optional_text(self.email.as_deref()),
            phone: normalize_optional_text(self.phone.as_deref()),
            notes: normalize_optional_text(self.notes.as_deref()),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub segment: String,
    pub location: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Company> for ActiveModel {
    fn from(company: &Company) -> Self {
        Self {
            id: ActiveValue::Set(company.id),
            name: ActiveValue::Set(company.name.clone()),
            segment: ActiveValue::Set(company.segment.clone()),
            location: ActiveValue::Set(company.location.clone()),
            email: ActiveValue::Set(company.email.clone()),
            phone: ActiveValue::Set(company.phone.clone()),
            notes: ActiveValue::Set(company.notes.clone()),
        }
    }
}

impl From<Model> for Company {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            segment: model.segment,
            location: model.location,
            email: model.email,
            phone: model.phone,
            notes: model.notes,
        }
    }
}

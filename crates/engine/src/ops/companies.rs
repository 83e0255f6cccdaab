use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Company, CompanyFields, ResultEngine, companies};

use super::{Engine, RecordKind, not_found, with_tx};

impl Engine {
    /// Companies ordered by name.
    pub async fn list_companies(&self) -> ResultEngine<Vec<Company>> {
        let models = companies::Entity::find()
            .order_by_asc(companies::Column::Name)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Company::from).collect())
    }

    pub async fn create_company(&self, fields: CompanyFields) -> ResultEngine<Company> {
        let company = fields.into_company(Uuid::new_v4())?;
        companies::ActiveModel::from(&company)
            .insert(&self.database)
            .await?;
        Ok(company)
    }

    pub async fn update_company(&self, id: Uuid, fields: CompanyFields) -> ResultEngine<Company> {
        let company = fields.into_company(id)?;
        with_tx!(self, |db_tx| {
            companies::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Company))?;
            companies::ActiveModel::from(&company).update(&db_tx).await?;
            Ok(company)
        })
    }
}

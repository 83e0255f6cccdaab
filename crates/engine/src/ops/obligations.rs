//! Receivables and payables share a shape; so do their store operations.

use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Payable, PayableFields, PayableStatus, Receivable, ReceivableFields, ReceivableStatus,
    ResultEngine, payables, receivables,
};

use super::{Engine, RecordKind, not_found, with_tx};

impl Engine {
    /// Receivables ordered by due date, earliest first.
    pub async fn list_receivables(&self) -> ResultEngine<Vec<Receivable>> {
        let models = receivables::Entity::find()
            .order_by_asc(receivables::Column::DueDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Receivable::try_from).collect()
    }

    pub async fn create_receivable(&self, fields: ReceivableFields) -> ResultEngine<Receivable> {
        let receivable = fields.into_receivable(Uuid::new_v4())?;
        receivables::ActiveModel::from(&receivable)
            .insert(&self.database)
            .await?;
        Ok(receivable)
    }

    pub async fn update_receivable(
        &self,
        id: Uuid,
        fields: ReceivableFields,
    ) -> ResultEngine<Receivable> {
        let receivable = fields.into_receivable(id)?;
        with_tx!(self, |db_tx| {
            receivables::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Receivable))?;
            receivables::ActiveModel::from(&receivable)
                .update(&db_tx)
                .await?;
            Ok(receivable)
        })
    }

    pub async fn set_receivable_status(
        &self,
        id: Uuid,
        status: ReceivableStatus,
    ) -> ResultEngine<Receivable> {
        with_tx!(self, |db_tx| {
            let model = receivables::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Receivable))?;
            let mut receivable = Receivable::try_from(model)?;
            receivable.status = status;

            receivables::ActiveModel {
                id: ActiveValue::Unchanged(id),
                status: ActiveValue::Set(status.as_str().to_string()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(receivable)
        })
    }

    /// Payables ordered by due date, earliest first.
    pub async fn list_payables(&self) -> ResultEngine<Vec<Payable>> {
        let models = payables::Entity::find()
            .order_by_asc(payables::Column::DueDate)
            .all(&self.database)
            .await?;
        models.into_iter().map(Payable::try_from).collect()
    }

    pub async fn create_payable(&self, fields: PayableFields) -> ResultEngine<Payable> {
        let payable = fields.into_payable(Uuid::new_v4())?;
        payables::ActiveModel::from(&payable)
            .insert(&self.database)
            .await?;
        Ok(payable)
    }

    pub async fn update_payable(&self, id: Uuid, fields: PayableFields) -> ResultEngine<Payable> {
        let payable = fields.into_payable(id)?;
        with_tx!(self, |db_tx| {
            payables::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Payable))?;
            payables::ActiveModel::from(&payable).update(&db_tx).await?;
            Ok(payable)
        })
    }

    pub async fn set_payable_status(
        &self,
        id: Uuid,
        status: PayableStatus,
    ) -> ResultEngine<Payable> {
        with_tx!(self, |db_tx| {
            let model = payables::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Payable))?;
            let mut payable = Payable::try_from(model)?;
            payable.status = status;

            payables::ActiveModel {
                id: ActiveValue::Unchanged(id),
                status: ActiveValue::Set(status.as_str().to_string()),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(payable)
        })
    }
}

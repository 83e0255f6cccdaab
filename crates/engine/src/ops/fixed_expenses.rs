use sea_orm::{ActiveValue, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{FixedExpense, FixedExpenseFields, ResultEngine, fixed_expenses};

use super::{Engine, RecordKind, not_found, with_tx};

impl Engine {
    /// Fixed expenses ordered by due day.
    pub async fn list_fixed_expenses(&self) -> ResultEngine<Vec<FixedExpense>> {
        let models = fixed_expenses::Entity::find()
            .order_by_asc(fixed_expenses::Column::DueDay)
            .all(&self.database)
            .await?;
        models.into_iter().map(FixedExpense::try_from).collect()
    }

    pub async fn create_fixed_expense(
        &self,
        fields: FixedExpenseFields,
    ) -> ResultEngine<FixedExpense> {
        let expense = fields.into_fixed_expense(Uuid::new_v4())?;
        fixed_expenses::ActiveModel::from(&expense)
            .insert(&self.database)
            .await?;
        Ok(expense)
    }

    pub async fn update_fixed_expense(
        &self,
        id: Uuid,
        fields: FixedExpenseFields,
    ) -> ResultEngine<FixedExpense> {
        let expense = fields.into_fixed_expense(id)?;
        with_tx!(self, |db_tx| {
            fixed_expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::FixedExpense))?;
            fixed_expenses::ActiveModel::from(&expense)
                .update(&db_tx)
                .await?;
            Ok(expense)
        })
    }

    /// Turn a recurring expense on or off without touching other fields.
    pub async fn set_fixed_expense_active(
        &self,
        id: Uuid,
        is_active: bool,
    ) -> ResultEngine<FixedExpense> {
        with_tx!(self, |db_tx| {
            let model = fixed_expenses::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::FixedExpense))?;
            let mut expense = FixedExpense::try_from(model)?;
            expense.is_active = is_active;

            fixed_expenses::ActiveModel {
                id: ActiveValue::Unchanged(id),
                is_active: ActiveValue::Set(is_active),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(expense)
        })
    }
}

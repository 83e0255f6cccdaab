use sea_orm::{QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{ResultEngine, Transaction, TransactionNew, TransactionUpdate, transactions};

use super::{Engine, RecordKind, not_found, with_tx};

impl Engine {
    /// Transactions, newest first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .all(&self.database)
            .await?;
        models.into_iter().map(Transaction::try_from).collect()
    }

    pub async fn create_transaction(&self, new: TransactionNew) -> ResultEngine<Transaction> {
        let transaction = new.into_transaction(Uuid::new_v4())?;
        transactions::ActiveModel::from(&transaction)
            .insert(&self.database)
            .await?;
        Ok(transaction)
    }

    /// Update everything but the kind, which is fixed at creation.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        update: TransactionUpdate,
    ) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| not_found(RecordKind::Transaction))?;
            let current = Transaction::try_from(model)?;
            let updated = update.apply(&current)?;
            transactions::ActiveModel::from(&updated)
                .update(&db_tx)
                .await?;
            Ok(updated)
        })
    }
}

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

mod companies;
mod fixed_expenses;
mod obligations;
mod snapshot;
mod transactions;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The five persisted collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Company,
    Transaction,
    Receivable,
    Payable,
    FixedExpense,
}

impl RecordKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordKind::Company => "company",
            RecordKind::Transaction => "transaction",
            RecordKind::Receivable => "receivable",
            RecordKind::Payable => "payable",
            RecordKind::FixedExpense => "fixed expense",
        }
    }
}

/// Record store over a sea-orm connection.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Delete one record. Records pointing at a deleted company keep their
    /// (now dangling) reference.
    pub async fn delete(&self, kind: RecordKind, id: Uuid) -> ResultEngine<()> {
        let result = match kind {
            RecordKind::Company => {
                crate::companies::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?
            }
            RecordKind::Transaction => {
                crate::transactions::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?
            }
            RecordKind::Receivable => {
                crate::receivables::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?
            }
            RecordKind::Payable => {
                crate::payables::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?
            }
            RecordKind::FixedExpense => {
                crate::fixed_expenses::Entity::delete_by_id(id)
                    .exec(&self.database)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(not_found(kind));
        }
        Ok(())
    }
}

fn not_found(kind: RecordKind) -> EngineError {
    EngineError::KeyNotFound(format!("{} not exists", kind.as_str()))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}

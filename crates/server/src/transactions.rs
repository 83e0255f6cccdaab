//! Transactions API endpoints

use api_types::transaction::{
    TransactionKind as ApiKind, TransactionNew, TransactionUpdate, TransactionView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, parse_amount, server::ServerState};

pub(crate) fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

pub(crate) fn engine_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

fn map_transaction(tx: &engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        kind: map_kind(tx.kind),
        amount_minor: tx.amount.cents(),
        category: tx.category.clone(),
        description: tx.description.clone(),
        date: tx.date,
        company_id: tx.company_id,
    }
}

/// Transactions as held by the in-memory ledger.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<TransactionView>>, ServerError> {
    let ledger = state.ledger.read().await;
    Ok(Json(
        ledger
            .snapshot()
            .transactions
            .iter()
            .map(map_transaction)
            .collect(),
    ))
}

/// Store a new transaction; its category joins the registry.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let new = engine::TransactionNew {
        kind: engine_kind(payload.kind),
        amount: parse_amount(&payload.amount)?,
        category: payload.category,
        description: payload.description,
        date: payload.date,
        company_id: payload.company_id,
    };
    let mut ledger = state.ledger.write().await;
    let tx = state.engine.create_transaction(new).await?;

    {
        let mut registry = state.categories.write().await;
        match registry.add_category(tx.kind, &tx.category) {
            Ok(next) => *registry = next,
            Err(err) => tracing::debug!("category {:?} not registered: {err}", tx.category),
        }
    }

    let view = map_transaction(&tx);
    ledger.upsert_transaction(tx);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let update = engine::TransactionUpdate {
        amount: parse_amount(&payload.amount)?,
        category: payload.category,
        description: payload.description,
        date: payload.date,
        company_id: payload.company_id,
    };
    let mut ledger = state.ledger.write().await;
    let tx = state
        .engine
        .update_transaction(transaction_id, update)
        .await?;

    let view = map_transaction(&tx);
    ledger.upsert_transaction(tx);
    Ok(Json(view))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(transaction_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut ledger = state.ledger.write().await;
    state
        .engine
        .delete(engine::RecordKind::Transaction, transaction_id)
        .await?;
    ledger.remove_transaction(transaction_id);
    Ok(StatusCode::NO_CONTENT)
}

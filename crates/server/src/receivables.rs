//! Receivables API endpoints

use api_types::{
    SearchQuery,
    receivable::{
        ReceivableInput, ReceivableStatus as ApiStatus, ReceivableStatusUpdate, ReceivableView,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::ReceivableStatus;
use uuid::Uuid;

use crate::{ServerError, parse_amount, server::ServerState};

fn map_status(status: ReceivableStatus) -> ApiStatus {
    match status {
        ReceivableStatus::Pending => ApiStatus::Pending,
        ReceivableStatus::Scheduled => ApiStatus::Scheduled,
        ReceivableStatus::Partial => ApiStatus::Partial,
        ReceivableStatus::Received => ApiStatus::Received,
        ReceivableStatus::Overdue => ApiStatus::Overdue,
    }
}

fn engine_status(status: ApiStatus) -> ReceivableStatus {
    match status {
        ApiStatus::Pending => ReceivableStatus::Pending,
        ApiStatus::Scheduled => ReceivableStatus::Scheduled,
        ApiStatus::Partial => ReceivableStatus::Partial,
        ApiStatus::Received => ReceivableStatus::Received,
        ApiStatus::Overdue => ReceivableStatus::Overdue,
    }
}

fn map_receivable(receivable: &engine::Receivable) -> ReceivableView {
    ReceivableView {
        id: receivable.id,
        description: receivable.description.clone(),
        amount_minor: receivable.amount.cents(),
        due_date: receivable.due_date,
        company_id: receivable.company_id,
        status: map_status(receivable.status),
        notes: receivable.notes.clone(),
    }
}

fn fields(payload: ReceivableInput) -> Result<engine::ReceivableFields, ServerError> {
    Ok(engine::ReceivableFields {
        description: payload.description,
        amount: parse_amount(&payload.amount)?,
        due_date: payload.due_date,
        company_id: payload.company_id,
        status: engine_status(payload.status),
        notes: payload.notes,
    })
}

/// Filtered by description, company name, amount or due date when `q` is
/// given.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ReceivableView>>, ServerError> {
    let ledger = state.ledger.read().await;
    let snapshot = ledger.snapshot();
    Ok(Json(
        engine::search_obligations(
            &snapshot.receivables,
            &snapshot.companies,
            query.q.as_deref().unwrap_or_default(),
        )
        .into_iter()
        .map(map_receivable)
        .collect(),
    ))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReceivableInput>,
) -> Result<(StatusCode, Json<ReceivableView>), ServerError> {
    let mut ledger = state.ledger.write().await;
    let receivable = state.engine.create_receivable(fields(payload)?).await?;
    let view = map_receivable(&receivable);
    ledger.upsert_receivable(receivable);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(receivable_id): Path<Uuid>,
    Json(payload): Json<ReceivableInput>,
) -> Result<Json<ReceivableView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let receivable = state
        .engine
        .update_receivable(receivable_id, fields(payload)?)
        .await?;
    let view = map_receivable(&receivable);
    ledger.upsert_receivable(receivable);
    Ok(Json(view))
}

pub async fn set_status(
    State(state): State<ServerState>,
    Path(receivable_id): Path<Uuid>,
    Json(payload): Json<ReceivableStatusUpdate>,
) -> Result<Json<ReceivableView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let receivable = state
        .engine
        .set_receivable_status(receivable_id, engine_status(payload.status))
        .await?;
    let view = map_receivable(&receivable);
    ledger.upsert_receivable(receivable);
    Ok(Json(view))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(receivable_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut ledger = state.ledger.write().await;
    state
        .engine
        .delete(engine::RecordKind::Receivable, receivable_id)
        .await?;
    ledger.remove_receivable(receivable_id);
    Ok(StatusCode::NO_CONTENT)
}

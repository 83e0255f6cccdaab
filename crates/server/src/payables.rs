//! Payables API endpoints

use api_types::{
    SearchQuery,
    payable::{
        PayableInput, PayableStatus as ApiStatus, PayableStatusUpdate, PayableView,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::PayableStatus;
use uuid::Uuid;

use crate::{ServerError, parse_amount, server::ServerState};

fn map_status(status: PayableStatus) -> ApiStatus {
    match status {
        PayableStatus::Pending => ApiStatus::Pending,
        PayableStatus::Scheduled => ApiStatus::Scheduled,
        PayableStatus::Partial => ApiStatus::Partial,
        PayableStatus::Paid => ApiStatus::Paid,
        PayableStatus::Overdue => ApiStatus::Overdue,
    }
}

fn engine_status(status: ApiStatus) -> PayableStatus {
    match status {
        ApiStatus::Pending => PayableStatus::Pending,
        ApiStatus::Scheduled => PayableStatus::Scheduled,
        ApiStatus::Partial => PayableStatus::Partial,
        ApiStatus::Paid => PayableStatus::Paid,
        ApiStatus::Overdue => PayableStatus::Overdue,
    }
}

fn map_payable(payable: &engine::Payable) -> PayableView {
    PayableView {
        id: payable.id,
        description: payable.description.clone(),
        amount_minor: payable.amount.cents(),
        due_date: payable.due_date,
        company_id: payable.company_id,
        status: map_status(payable.status),
        notes: payable.notes.clone(),
    }
}

fn fields(payload: PayableInput) -> Result<engine::PayableFields, ServerError> {
    Ok(engine::PayableFields {
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
) -> Result<Json<Vec<PayableView>>, ServerError> {
    let ledger = state.ledger.read().await;
    let snapshot = ledger.snapshot();
    Ok(Json(
        engine::search_obligations(
            &snapshot.payables,
            &snapshot.companies,
            query.q.as_deref().unwrap_or_default(),
        )
        .into_iter()
        .map(map_payable)
        .collect(),
    ))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PayableInput>,
) -> Result<(StatusCode, Json<PayableView>), ServerError> {
    let mut ledger = state.ledger.write().await;
    let payable = state.engine.create_payable(fields(payload)?).await?;
    let view = map_payable(&payable);
    ledger.upsert_payable(payable);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(payable_id): Path<Uuid>,
    Json(payload): Json<PayableInput>,
) -> Result<Json<PayableView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let payable = state
        .engine
        .update_payable(payable_id, fields(payload)?)
        .await?;
    let view = map_payable(&payable);
    ledger.upsert_payable(payable);
    Ok(Json(view))
}

pub async fn set_status(
    State(state): State<ServerState>,
    Path(payable_id): Path<Uuid>,
    Json(payload): Json<PayableStatusUpdate>,
) -> Result<Json<PayableView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let payable = state
        .engine
        .set_payable_status(payable_id, engine_status(payload.status))
        .await?;
    let view = map_payable(&payable);
    ledger.upsert_payable(payable);
    Ok(Json(view))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(payable_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut ledger = state.ledger.write().await;
    state
        .engine
        .delete(engine::RecordKind::Payable, payable_id)
        .await?;
    ledger.remove_payable(payable_id);
    Ok(StatusCode::NO_CONTENT)
}

//! Fixed expenses API endpoints

use api_types::fixed_expense::{FixedExpenseActive, FixedExpenseInput, FixedExpenseView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EngineError, FixedExpenseCategory};
use uuid::Uuid;

use crate::{ServerError, parse_amount, server::ServerState};

fn map_fixed_expense(expense: &engine::FixedExpense) -> FixedExpenseView {
    FixedExpenseView {
        id: expense.id,
        description: expense.description.clone(),
        amount_minor: expense.amount.cents(),
        due_day: expense.due_day,
        category: expense.category.as_str().to_string(),
        is_active: expense.is_active,
        notes: expense.notes.clone(),
    }
}

fn fields(payload: FixedExpenseInput) -> Result<engine::FixedExpenseFields, ServerError> {
    let category = FixedExpenseCategory::try_from(payload.category.trim()).map_err(|_| {
        EngineError::Validation(format!(
            "unknown fixed expense category '{}'",
            payload.category
        ))
    })?;

    Ok(engine::FixedExpenseFields {
        description: payload.description,
        amount: parse_amount(&payload.amount)?,
        due_day: payload.due_day,
        category,
        is_active: payload.is_active,
        notes: payload.notes,
    })
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<FixedExpenseView>>, ServerError> {
    let ledger = state.ledger.read().await;
    Ok(Json(
        ledger
            .snapshot()
            .fixed_expenses
            .iter()
            .map(map_fixed_expense)
            .collect(),
    ))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FixedExpenseInput>,
) -> Result<(StatusCode, Json<FixedExpenseView>), ServerError> {
    let mut ledger = state.ledger.write().await;
    let expense = state.engine.create_fixed_expense(fields(payload)?).await?;
    let view = map_fixed_expense(&expense);
    ledger.upsert_fixed_expense(expense);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<FixedExpenseInput>,
) -> Result<Json<FixedExpenseView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let expense = state
        .engine
        .update_fixed_expense(expense_id, fields(payload)?)
        .await?;
    let view = map_fixed_expense(&expense);
    ledger.upsert_fixed_expense(expense);
    Ok(Json(view))
}

/// Inactive expenses stay listed but drop out of the working capital.
pub async fn set_active(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
    Json(payload): Json<FixedExpenseActive>,
) -> Result<Json<FixedExpenseView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let expense = state
        .engine
        .set_fixed_expense_active(expense_id, payload.is_active)
        .await?;
    let view = map_fixed_expense(&expense);
    ledger.upsert_fixed_expense(expense);
    Ok(Json(view))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(expense_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut ledger = state.ledger.write().await;
    state
        .engine
        .delete(engine::RecordKind::FixedExpense, expense_id)
        .await?;
    ledger.remove_fixed_expense(expense_id);
    Ok(StatusCode::NO_CONTENT)
}

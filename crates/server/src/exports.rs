//! Transaction report downloads

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::{ServerError, server::ServerState};

fn report_totals(snapshot: &engine::Snapshot) -> Result<engine::Totals, ServerError> {
    Ok(engine::totals(
        &snapshot.transactions,
        &snapshot.receivables,
        &snapshot.payables,
    )?)
}

pub async fn csv(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let ledger = state.ledger.read().await;
    let snapshot = ledger.snapshot();
    let body = engine::export::transactions_csv(snapshot, &report_totals(snapshot)?)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}

pub async fn json(State(state): State<ServerState>) -> Result<Response, ServerError> {
    let ledger = state.ledger.read().await;
    let snapshot = ledger.snapshot();
    let body = engine::export::transactions_json(snapshot, &report_totals(snapshot)?)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.json\"",
            ),
        ],
        body,
    )
        .into_response())
}

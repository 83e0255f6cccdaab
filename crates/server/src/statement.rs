//! Combined statement endpoint

use api_types::statement::{Statement, StatementLine, StatementQuery, StatementSource};
use axum::{
    Json,
    extract::{Query, State},
};

use crate::{ServerError, server::ServerState, transactions::map_kind};

fn map_source(source: engine::StatementSource) -> StatementSource {
    match source {
        engine::StatementSource::Transaction => StatementSource::Transaction,
        engine::StatementSource::Receivable => StatementSource::Receivable,
        engine::StatementSource::Payable => StatementSource::Payable,
    }
}

fn map_line(line: engine::StatementLine) -> StatementLine {
    StatementLine {
        id: line.id,
        source: map_source(line.source),
        kind: map_kind(line.kind),
        amount_minor: line.amount.cents(),
        category: line.category,
        description: line.description,
        date: line.date,
        company_id: line.company_id,
        company_name: line.company_name,
    }
}

/// Transactions plus settled receivables and payables, newest first,
/// optionally filtered by `q`.
pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<StatementQuery>,
) -> Result<Json<Statement>, ServerError> {
    let ledger = state.ledger.read().await;
    let mut lines = engine::statement(ledger.snapshot());
    if let Some(term) = query.q.as_deref() {
        lines = engine::search_statement(&lines, term);
    }

    Ok(Json(Statement {
        lines: lines.into_iter().map(map_line).collect(),
    }))
}

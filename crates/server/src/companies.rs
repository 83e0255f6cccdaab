//! Companies API endpoints

use api_types::{
    SearchQuery,
    company::{CompanyInput, CompanyView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_company(company: &engine::Company) -> CompanyView {
    CompanyView {
        id: company.id,
        name: company.name.clone(),
        segment: company.segment.clone(),
        location: company.location.clone(),
        email: company.email.clone(),
        phone: company.phone.clone(),
        notes: company.notes.clone(),
    }
}

fn fields(payload: CompanyInput) -> engine::CompanyFields {
    engine::CompanyFields {
        name: payload.name,
        segment: payload.segment,
        location: payload.location,
        email: payload.email,
        phone: payload.phone,
        notes: payload.notes,
    }
}

/// Companies in store order, filtered by name, segment, location or email
/// when `q` is given.
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CompanyView>>, ServerError> {
    let ledger = state.ledger.read().await;
    let companies = &ledger.snapshot().companies;
    Ok(Json(
        engine::search_companies(companies, query.q.as_deref().unwrap_or_default())
            .into_iter()
            .map(map_company)
            .collect(),
    ))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CompanyInput>,
) -> Result<(StatusCode, Json<CompanyView>), ServerError> {
    let mut ledger = state.ledger.write().await;
    let company = state.engine.create_company(fields(payload)).await?;
    let view = map_company(&company);
    ledger.upsert_company(company);
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(company_id): Path<Uuid>,
    Json(payload): Json<CompanyInput>,
) -> Result<Json<CompanyView>, ServerError> {
    let mut ledger = state.ledger.write().await;
    let company = state
        .engine
        .update_company(company_id, fields(payload))
        .await?;
    let view = map_company(&company);
    ledger.upsert_company(company);
    Ok(Json(view))
}

/// Records that reference the company keep their `company_id`.
pub async fn remove(
    State(state): State<ServerState>,
    Path(company_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    let mut ledger = state.ledger.write().await;
    state
        .engine
        .delete(engine::RecordKind::Company, company_id)
        .await?;
    ledger.remove_company(company_id);
    Ok(StatusCode::NO_CONTENT)
}

//! Categories API endpoints.

use api_types::category::{Categories, CategoryNew};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState, transactions::engine_kind};

fn map_registry(registry: &engine::CategoryRegistry) -> Categories {
    Categories {
        income: registry
            .categories(engine::TransactionKind::Income)
            .to_vec(),
        expense: registry
            .categories(engine::TransactionKind::Expense)
            .to_vec(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Categories>, ServerError> {
    let registry = state.categories.read().await;
    Ok(Json(map_registry(&registry)))
}

/// Adding a name that is already registered (ignoring case and accents) is a
/// no-op.
pub async fn add(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<Json<Categories>, ServerError> {
    let mut registry = state.categories.write().await;
    let next = registry.add_category(engine_kind(payload.kind), &payload.name)?;
    *registry = next;
    Ok(Json(map_registry(&registry)))
}

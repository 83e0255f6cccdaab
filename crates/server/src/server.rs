use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
};
use tokio::sync::RwLock;

use std::sync::Arc;

use crate::{
    categories, companies, dashboard, exports, fixed_expenses, payables, receivables, statement,
    transactions,
};
use engine::{CategoryRegistry, CredentialVerifier, Engine, EngineError, Ledger};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub ledger: Arc<RwLock<Ledger>>,
    pub categories: Arc<RwLock<CategoryRegistry>>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl ServerState {
    /// Load every collection from the store and seed the category registry
    /// with the defaults plus the categories already in use.
    pub async fn load(
        engine: Engine,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, EngineError> {
        let snapshot = engine.load_snapshot().await?;

        let mut registry = CategoryRegistry::default();
        for tx in &snapshot.transactions {
            match registry.add_category(tx.kind, &tx.category) {
                Ok(next) => registry = next,
                Err(err) => tracing::warn!("skipping category {:?}: {err}", tx.category),
            }
        }

        tracing::info!(
            "loaded {} companies, {} transactions, {} receivables, {} payables, {} fixed expenses",
            snapshot.companies.len(),
            snapshot.transactions.len(),
            snapshot.receivables.len(),
            snapshot.payables.len(),
            snapshot.fixed_expenses.len(),
        );

        Ok(Self {
            engine: Arc::new(engine),
            ledger: Arc::new(RwLock::new(Ledger::new(snapshot))),
            categories: Arc::new(RwLock::new(registry)),
            verifier,
        })
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(TypedHeader(credentials)) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    if !state
        .verifier
        .verify(credentials.username(), credentials.password())
    {
        tracing::warn!("rejected credentials for {:?}", credentials.username());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

pub fn app(state: ServerState) -> Router {
    Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/{id}",
            patch(companies::update).delete(companies::remove),
        )
        .route(
            "/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/transactions/{id}",
            patch(transactions::update).delete(transactions::remove),
        )
        .route(
            "/receivables",
            get(receivables::list).post(receivables::create),
        )
        .route(
            "/receivables/{id}",
            patch(receivables::update).delete(receivables::remove),
        )
        .route("/receivables/{id}/status", post(receivables::set_status))
        .route("/payables", get(payables::list).post(payables::create))
        .route(
            "/payables/{id}",
            patch(payables::update).delete(payables::remove),
        )
        .route("/payables/{id}/status", post(payables::set_status))
        .route(
            "/fixedExpenses",
            get(fixed_expenses::list).post(fixed_expenses::create),
        )
        .route(
            "/fixedExpenses/{id}",
            patch(fixed_expenses::update).delete(fixed_expenses::remove),
        )
        .route(
            "/fixedExpenses/{id}/active",
            post(fixed_expenses::set_active),
        )
        .route("/dashboard", get(dashboard::get))
        .route("/statement", get(statement::get))
        .route("/export/transactions.csv", get(exports::csv))
        .route("/export/transactions.json", get(exports::json))
        .route("/categories", get(categories::list).post(categories::add))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub async fn run_with_listener(
    state: ServerState,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(state)).await
}

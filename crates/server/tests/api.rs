use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, Sha256Credential};
use server::{ServerState, app};

async fn test_state() -> ServerState {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let verifier = Arc::new(Sha256Credential::new(
        "admin",
        Sha256Credential::digest("s3cret"),
    ));
    ServerState::load(engine, verifier).await.unwrap()
}

async fn test_app() -> Router {
    app(test_state().await)
}

fn basic(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}

fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, basic("admin", "s3cret"));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn missing_or_wrong_credentials_are_rejected() {
    let app = test_app().await;

    let anonymous = Request::builder()
        .uri("/dashboard")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, anonymous).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let wrong = Request::builder()
        .uri("/dashboard")
        .header(header::AUTHORIZATION, basic("admin", "guess"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn dashboard_reflects_created_records() {
    let app = test_app().await;

    let (status, company) = send(
        &app,
        request(
            "POST",
            "/companies",
            Some(json!({"name": "Acme", "segment": "Retail", "location": "Recife"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let company_id = company["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(json!({
                "kind": "income",
                "amount": "1500,00",
                "category": "Service Provision",
                "date": "2024-05-10",
                "company_id": company_id,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(json!({
                "kind": "expense",
                "amount": "200.50",
                "category": "Food",
                "date": "2024-05-11",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, receivable) = send(
        &app,
        request(
            "POST",
            "/receivables",
            Some(json!({
                "description": "Invoice 7",
                "amount": "300",
                "due_date": "2024-05-20",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(receivable["status"], "pending");

    let (status, dashboard) = send(&app, request("GET", "/dashboard?today=2024-05-31", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["totals"]["income_minor"], 150_000);
    assert_eq!(dashboard["totals"]["expenses_minor"], 20_050);
    assert_eq!(dashboard["totals"]["balance_minor"], 129_950);
    assert_eq!(dashboard["working_capital"]["total_receivables_minor"], 30_000);
    assert_eq!(dashboard["monthly"].as_array().map(Vec::len), Some(6));
    assert_eq!(dashboard["monthly"][5]["label"], "05/2024");
    assert_eq!(dashboard["ranking"]["top_income"][0]["name"], "Acme");

    let receivable_id = receivable["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        request(
            "POST",
            &format!("/receivables/{receivable_id}/status"),
            Some(json!({"status": "received"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, dashboard) = send(&app, request("GET", "/dashboard?today=2024-05-31", None)).await;
    assert_eq!(dashboard["totals"]["income_minor"], 180_000);
    assert_eq!(dashboard["working_capital"]["total_receivables_minor"], 0);

    let (_, statement) = send(&app, request("GET", "/statement?q=invoice", None)).await;
    assert_eq!(statement["lines"].as_array().map(Vec::len), Some(1));
    assert_eq!(statement["lines"][0]["category"], "Amount Received");
}

#[tokio::test]
async fn invalid_input_and_unknown_ids_map_to_statuses() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/fixedExpenses",
            Some(json!({
                "description": "Rent",
                "amount": "1200",
                "due_day": 40,
                "category": "rent",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("due day"));

    let (status, _) = send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(json!({
                "kind": "income",
                "amount": "12.345",
                "category": "Other",
                "date": "2024-05-10",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        request("DELETE", &format!("/payables/{missing}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn fixed_expense_toggle_and_categories() {
    let app = test_app().await;

    let (status, expense) = send(
        &app,
        request(
            "POST",
            "/fixedExpenses",
            Some(json!({
                "description": "Office rent",
                "amount": "2500",
                "due_day": 5,
                "category": "rent",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(expense["is_active"], true);

    let id = expense["id"].as_str().unwrap();
    let (status, toggled) = send(
        &app,
        request(
            "POST",
            &format!("/fixedExpenses/{id}/active"),
            Some(json!({"is_active": false})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["is_active"], false);

    let (_, dashboard) = send(&app, request("GET", "/dashboard?today=2024-05-31", None)).await;
    assert_eq!(dashboard["working_capital"]["total_fixed_expenses_minor"], 0);

    let (status, categories) = send(
        &app,
        request(
            "POST",
            "/categories",
            Some(json!({"kind": "income", "name": "Consulting"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let income = categories["income"].as_array().unwrap();
    assert!(income.iter().any(|name| name == "Consulting"));

    let (_, again) = send(
        &app,
        request(
            "POST",
            "/categories",
            Some(json!({"kind": "income", "name": "consulting"})),
        ),
    )
    .await;
    assert_eq!(again["income"].as_array().map(Vec::len), Some(income.len()));
}

#[tokio::test]
async fn csv_export_is_downloadable() {
    let app = test_app().await;
    send(
        &app,
        request(
            "POST",
            "/transactions",
            Some(json!({
                "kind": "expense",
                "amount": "20",
                "category": "Transport",
                "date": "2024-02-29",
            })),
        ),
    )
    .await;

    let res = app
        .clone()
        .oneshot(request("GET", "/export/transactions.csv", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with("date,type,category,company,amount,description"));
    assert!(text.contains("29/02/2024,Expense,Transport,-,\"R$ 20,00\",-"));
}

#[tokio::test]
async fn list_endpoints_filter_by_query() {
    let app = test_app().await;

    let (_, acme) = send(
        &app,
        request(
            "POST",
            "/companies",
            Some(json!({"name": "Acme", "segment": "Retail", "location": "Recife"})),
        ),
    )
    .await;
    send(
        &app,
        request(
            "POST",
            "/companies",
            Some(json!({"name": "Borba", "segment": "Logistics", "location": "Natal"})),
        ),
    )
    .await;

    let (status, companies) = send(&app, request("GET", "/companies?q=logis", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(companies.as_array().map(Vec::len), Some(1));
    assert_eq!(companies[0]["name"], "Borba");

    for (description, company_id) in [("Invoice 12", acme["id"].clone()), ("Deposit", Value::Null)] {
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/receivables",
                Some(json!({
                    "description": description,
                    "amount": "300",
                    "due_date": "2024-07-01",
                    "company_id": company_id,
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, by_company) = send(&app, request("GET", "/receivables?q=acme", None)).await;
    assert_eq!(by_company.as_array().map(Vec::len), Some(1));
    assert_eq!(by_company[0]["description"], "Invoice 12");

    let (_, all) = send(&app, request("GET", "/receivables?q=", None)).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));

    let (_, none) = send(&app, request("GET", "/payables?q=acme", None)).await;
    assert_eq!(none.as_array().map(Vec::len), Some(0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_leave_ledger_matching_store() {
    let state = test_state().await;
    let app = app(state.clone());

    let (status, receivable) = send(
        &app,
        request(
            "POST",
            "/receivables",
            Some(json!({"description": "Invoice", "amount": "1", "due_date": "2024-07-01"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/receivables/{}", receivable["id"].as_str().unwrap());

    let mut tasks = tokio::task::JoinSet::new();
    for amount in 1..=20 {
        let app = app.clone();
        let uri = uri.clone();
        tasks.spawn(async move {
            let body = json!({
                "description": "Invoice",
                "amount": amount.to_string(),
                "due_date": "2024-07-01",
            });
            send(&app, request("PATCH", &uri, Some(body))).await.0
        });
    }
    while let Some(status) = tasks.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let stored = state.engine.list_receivables().await.unwrap();
    let (_, listed) = send(&app, request("GET", "/receivables", None)).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(listed[0]["amount_minor"], stored[0].amount.cents());
}

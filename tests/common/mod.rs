#![allow(dead_code)]

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use sebo::brasil_api::BrasilApiClient;
use sebo::db;
use sebo::infrastructure::AppState;
use sebo::server;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

// Nothing listens on the discard port; only the lookup tests point the
// client at a mock server.
const UNUSED_LOOKUP_URL: &str = "http://127.0.0.1:9";

// Helper to create the full application over a fresh in-memory database
pub async fn setup_app() -> (Router, DatabaseConnection) {
    setup_app_with_lookup(UNUSED_LOOKUP_URL).await
}

pub async fn setup_app_with_lookup(lookup_url: &str) -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let lookup = BrasilApiClient::new(lookup_url, Duration::from_millis(500))
        .expect("Failed to build lookup client");
    let app = server::build_router(AppState::new(db.clone(), lookup), &[]);
    (app, db)
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    dispatch(app, request).await
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

/// State -> city -> neighborhood chain; returns the neighborhood's postal code
pub async fn seed_location(app: &Router) -> i64 {
    let (_, state) = send(
        app,
        "POST",
        "/estados",
        Some(serde_json::json!({ "nm_estado": "Bahia" })),
    )
    .await;
    let (_, city) = send(
        app,
        "POST",
        "/cidades",
        Some(serde_json::json!({ "nm_cidade": "Salvador", "id_estado": state["id_estado"] })),
    )
    .await;
    let (status, _) = send(
        app,
        "POST",
        "/bairros",
        Some(serde_json::json!({
            "cep": 40070110,
            "nm_bairro": "Centro",
            "id_cidade": city["id_cidade"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    40070110
}

pub async fn seed_user(app: &Router, login: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/usuarios",
        Some(serde_json::json!({
            "login": login,
            "senha": "segredo",
            "nm_usuario": login.to_uppercase()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, SecondsFormat, Utc};
use ledger_core::adapters::InMemoryTransactionRepository;
use ledger_core::{create_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn setup_test_app() -> Router {
    create_app(AppState::new(Arc::new(InMemoryTransactionRepository::new())))
}

fn seconds_ago(seconds: i64) -> String {
    (Utc::now() - Duration::seconds(seconds)).to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

#[tokio::test]
async fn test_create_and_fetch_transaction() {
    let app = setup_test_app();
    let occurred_at = seconds_ago(5);

    let (status, created) = send(
        &app,
        "POST",
        "/transaction",
        Some(json!({ "id": "tx-1", "value": 10.5, "dateTime": occurred_at })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], "tx-1");
    assert_eq!(created["value"], 10.5);

    let (status, fetched) = send(&app, "GET", "/transaction/tx-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, all) = send(&app, "GET", "/transaction", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_is_empty_array_initially() {
    let app = setup_test_app();
    let (status, all) = send(&app, "GET", "/transaction", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_validation_failures_return_422() {
    let app = setup_test_app();

    let cases = [
        (
            json!({ "value": 10, "dateTime": seconds_ago(1) }),
            r#"Fields "id", "value" and "dateTime" are required"#,
        ),
        (
            json!({ "id": "zero", "value": 0, "dateTime": seconds_ago(1) }),
            r#"Fields "id", "value" and "dateTime" are required"#,
        ),
        (
            json!({ "id": "neg", "value": -4.5, "dateTime": seconds_ago(1) }),
            "Transaction value must be greater than zero",
        ),
        (
            json!({ "id": "future", "value": 4.5, "dateTime": seconds_ago(-3600) }),
            "Transaction cannot take place in the future",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = send(&app, "POST", "/transaction", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], message);
        assert_eq!(body["status"], 422);
    }

    let (_, all) = send(&app, "GET", "/transaction", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let app = setup_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/transaction",
        Some(json!({ "id": "tx", "value": "ten", "dateTime": seconds_ago(1) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/transaction",
        Some(json!({ "id": "tiny", "value": "1e-99999999999", "dateTime": seconds_ago(1) })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, all) = send(&app, "GET", "/transaction", None).await;
    assert_eq!(all, json!([]));

    let (status, body) = send(&app, "POST", "/transaction", Some(json!([1, 2, 3]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad Request");
}

#[tokio::test]
async fn test_duplicate_id_returns_409() {
    let app = setup_test_app();
    let payload = json!({ "id": "dup", "value": 1, "dateTime": seconds_ago(1) });

    let (status, _) = send(&app, "POST", "/transaction", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/transaction", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_missing_transaction_returns_404_for_get_and_delete() {
    let app = setup_test_app();

    let (get_status, get_body) = send(&app, "GET", "/transaction/nope", None).await;
    let (delete_status, delete_body) = send(&app, "DELETE", "/transaction/nope", None).await;

    assert_eq!(get_status, StatusCode::NOT_FOUND);
    assert_eq!(delete_status, StatusCode::NOT_FOUND);
    assert_eq!(get_body, delete_body);
    assert_eq!(get_body["message"], "Transaction not found");
}

#[tokio::test]
async fn test_delete_by_id_and_delete_all() {
    let app = setup_test_app();
    for id in ["a", "b", "c"] {
        let (status, _) = send(
            &app,
            "POST",
            "/transaction",
            Some(json!({ "id": id, "value": 2, "dateTime": seconds_ago(1) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "DELETE", "/transaction/a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/transaction/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/transaction", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (_, all) = send(&app, "GET", "/transaction", None).await;
    assert_eq!(all, json!([]));

    let (status, _) = send(&app, "DELETE", "/transaction", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_statistics_over_last_minute() {
    let app = setup_test_app();

    let (status, stats) = send(&app, "GET", "/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["count"], 0);
    for field in ["sum", "avg", "min", "max"] {
        assert_eq!(stats[field].as_f64(), Some(0.0));
    }

    let entries = [
        ("t1", json!(10.50), 2),
        ("t2", json!(20.00), 10),
        ("t3", json!(5.25), 20),
        ("t4", json!(15.00), 30),
        ("stale", json!(999), 300),
    ];
    for (id, value, age) in entries {
        let (status, _) = send(
            &app,
            "POST",
            "/transaction",
            Some(json!({ "id": id, "value": value, "dateTime": seconds_ago(age) })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = send(&app, "GET", "/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        stats,
        json!({ "count": 4, "sum": 50.75, "avg": 12.688, "min": 5.25, "max": 20.0 })
    );
}

#[tokio::test]
async fn test_statistics_round_half_up() {
    let app = setup_test_app();
    for (id, value) in [("a", 1.123), ("b", 2.234), ("c", 3.345)] {
        send(
            &app,
            "POST",
            "/transaction",
            Some(json!({ "id": id, "value": value, "dateTime": seconds_ago(3) })),
        )
        .await;
    }

    let (_, stats) = send(&app, "GET", "/statistics", None).await;
    assert_eq!(
        stats,
        json!({ "count": 3, "sum": 6.7, "avg": 2.234, "min": 1.12, "max": 3.35 })
    );
}

#[tokio::test]
async fn test_statistics_also_served_at_legacy_path() {
    let app = setup_test_app();
    send(
        &app,
        "POST",
        "/transaction",
        Some(json!({ "id": "legacy", "value": 7.5, "dateTime": seconds_ago(2) })),
    )
    .await;

    let (status, legacy) = send(&app, "GET", "/estatistics", None).await;
    let (_, current) = send(&app, "GET", "/statistics", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(legacy, current);
    assert_eq!(legacy["count"], 1);
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = setup_test_app();

    let (status, health) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["store"], "connected");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/transaction"].is_object());
    assert!(doc["paths"]["/statistics"].is_object());
}

#[tokio::test]
async fn test_end_to_end_over_http() {
    let app = setup_test_app();
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = axum::Server::from_tcp(listener)
        .unwrap()
        .serve(app.into_make_service());
    tokio::spawn(async move {
        server.await.unwrap();
    });

    let base_url = format!("http://{}", addr);
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/transaction", base_url))
        .json(&json!({ "id": "http-1", "value": 42.00, "dateTime": seconds_ago(1) }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    assert!(res.headers().contains_key("x-request-id"));

    let stats: Value = client
        .get(format!("{}/statistics", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        stats,
        json!({ "count": 1, "sum": 42.0, "avg": 42.0, "min": 42.0, "max": 42.0 })
    );
}

//! End-to-end behaviour of the task routes.

use axum::http::StatusCode;
use serde_json::{json, Value};

mod common;

const QUEUED: &str = r#"{"priority":2,"score":0.8,"status":"queued"}"#;

#[tokio::test]
async fn test_create_then_list() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;
    let client = common::client();

    let res = client
        .post(format!("{}/tasks", url))
        .json(&json!({ "text": "buy milk" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let created: Value = res.json().await.unwrap();
    assert_eq!(
        created,
        json!({ "id": 1, "text": "buy milk", "priority": 2, "score": 0.8, "status": "queued" })
    );

    let res = client.get(format!("{}/tasks", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "application/json");
    let listed: Value = res.json().await.unwrap();
    assert_eq!(listed, json!([created]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_list_and_health() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;
    let client = common::client();

    let listed: Value = client.get(format!("{}/tasks", url)).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));

    let res = client.get(format!("{}/health", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "ok");

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_bodies_rejected_without_side_effects() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;
    let client = common::client();

    for body in [r#"{}"#, r#"{"text":""}"#, "not json", r#"{"text":42}"#, ""] {
        let res = client
            .post(format!("{}/tasks", url))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
    }

    let listed: Value = client.get(format!("{}/tasks", url)).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_other_methods_not_allowed() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;
    let client = common::client();

    for method in [
        reqwest::Method::PUT,
        reqwest::Method::DELETE,
        reqwest::Method::PATCH,
        reqwest::Method::HEAD,
    ] {
        let res = client.request(method.clone(), format!("{}/tasks", url)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED, "method {}", method);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let worker = common::start_mock_worker(QUEUED).await;
    let mut config = common::config_for(worker);
    config.security.max_body_size = 1024;
    let (url, shutdown) = common::start_service(config).await;
    let client = common::client();

    let res = client
        .post(format!("{}/tasks", url))
        .json(&json!({ "text": "x".repeat(2048) }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let listed: Value = client.get(format!("{}/tasks", url)).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, json!([]));

    shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;

    let res = common::client().get(format!("{}/nope", url)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "not found");

    shutdown.trigger();
}

#[tokio::test]
async fn test_worker_receives_task_text() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let worker = common::start_programmable_worker(move |call| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(call);
            (200, QUEUED.to_string())
        }
    })
    .await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;

    let res = common::client()
        .post(format!("{}/tasks", url))
        .json(&json!({ "text": "walk dog" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let call = rx.recv().await.unwrap();
    let body: Value = serde_json::from_slice(&call.body).unwrap();
    assert_eq!(body, json!({ "text": "walk dog" }));
    assert_eq!(call.headers["content-type"], "application/json");

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_returned() {
    let worker = common::start_mock_worker(QUEUED).await;
    let (url, shutdown) = common::start_service(common::config_for(worker)).await;

    let res = common::client().get(format!("{}/health", url)).send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    shutdown.trigger();
}

//! Local stand-in for the enrichment worker.
//!
//! Answers `POST /enrich` with a random priority and score after a short
//! delay. Text containing "fail" produces a 500, empty text a 400.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use rand::Rng;
use serde::Deserialize;
use serde_json::json;

#[derive(Parser)]
#[command(name = "mock-worker")]
#[command(about = "Mock enrichment worker for local runs", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "0.0.0.0:8090")]
    bind: SocketAddr,
}

#[derive(Debug, Default, Deserialize)]
struct EnrichBody {
    #[serde(default)]
    text: String,
}

async fn enrich(body: Bytes) -> impl IntoResponse {
    let text = serde_json::from_slice::<EnrichBody>(&body).unwrap_or_default().text;
    if text.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "missing text" })));
    }
    if text.to_lowercase().contains("fail") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "forced failure" })));
    }

    let (delay_ms, priority, score) = {
        let mut rng = rand::thread_rng();
        let score: f64 = rng.gen();
        (
            rng.gen_range(20..=200u64),
            rng.gen_range(1..=5i64),
            (score * 1000.0).round() / 1000.0,
        )
    };
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;

    (
        StatusCode::OK,
        Json(json!({ "priority": priority, "score": score, "status": "enriched" })),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let app = Router::new()
        .route("/", get(|| async { "Welcome to the Task Enrichment Service! Go to /enrich to enrich tasks." }))
        .route("/enrich", post(enrich))
        .route("/health", get(|| async { "ok" }));

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    tracing::info!(address = %args.bind, "mock worker listening");
    axum::serve(listener, app).await?;
    Ok(())
}

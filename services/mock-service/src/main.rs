//! Toy HTTP endpoint for manually smoke-testing a generated plan against a
//! live port. Carries no planning logic.
//!
//! Run with `cargo run -p mock-service`, then point a load generator at
//! `http://127.0.0.1:8001/api/demo`.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct DemoResponse {
    message: &'static str,
}

async fn demo() -> Json<DemoResponse> {
    info!("demo request received");
    Json(DemoResponse { message: "ok" })
}

fn app() -> Router {
    Router::new().route("/api/demo", get(demo))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8001").await?;
    info!("mock service listening on {}", listener.local_addr()?);
    axum::serve(listener, app()).await?;
    Ok(())
}

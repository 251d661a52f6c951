use axum::{body::Body, http::StatusCode, response::Redirect, routing::get, Router};
use futures::stream::{self, StreamExt};
use chrono::Utc;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use crate::config::{MonitorConfig, Target};
use crate::models::{CheckResult, HealthState};

pub fn check(name: &str, status: HealthState, latency_ms: f64) -> CheckResult {
    CheckResult {
        timestamp: Utc::now(),
        name: name.into(),
        url: format!("http://{name}.internal"),
        status,
        latency_ms,
        status_code: if status == HealthState::Down { 0 } else { 200 },
        error: None,
    }
}

pub fn test_router() -> Router {
    Router::new()
        .route("/ok", get(|| async { "ok" }))
        .route("/error", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }))
        .route("/moved", get(|| async { Redirect::temporary("/ok") }))
        .route(
            "/stall",
            get(|| async {
                // Headers and a first chunk go out at once, the rest never arrives in time.
                let first = stream::once(async { Ok::<_, std::io::Error>("partial ") });
                let rest = stream::once(async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, std::io::Error>("body")
                });
                Body::from_stream(first.chain(rest))
            }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        )
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An address nothing listens on.
pub async fn unused_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

pub fn config_with(targets: Vec<Target>, data_dir: &Path) -> MonitorConfig {
    MonitorConfig {
        targets,
        data_file: data_dir.join("monitoring.json"),
        static_dir: data_dir.join("public"),
        ..MonitorConfig::default()
    }
}

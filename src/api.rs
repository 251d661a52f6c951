use anyhow::{Context, Result};
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use crate::engine::Monitor;
use crate::models::{EngineHealth, Snapshot};

pub async fn get_status(State(monitor): State<Arc<Monitor>>) -> Json<Snapshot> {
    Json(monitor.snapshot().await)
}

pub async fn get_health(State(monitor): State<Arc<Monitor>>) -> Json<EngineHealth> {
    Json(monitor.engine_health().await)
}

pub fn create_router(monitor: Arc<Monitor>, static_dir: &Path) -> Router {
    Router::new()
        .route("/api/status", get(get_status))
        .route("/api/health", get(get_health))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(monitor)
}

pub async fn start_server(port: u16, monitor: Arc<Monitor>) -> Result<()> {
    let app = create_router(monitor.clone(), &monitor.config.static_dir);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind API port {}", port))?;
    info!("Dashboard: http://localhost:{}", addr.port());
    axum::serve(listener, app).await.context("API server failed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::Target;
    use crate::models::HealthState;
    use crate::test_support::{check, config_with};

    async fn get_json(app: Router, uri: &str) -> serde_json::Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn monitor(dir: &Path) -> Arc<Monitor> {
        let targets = vec![Target::new("web", "http://web:80", 1000), Target::new("db", "http://db:80", 1000)];
        Arc::new(Monitor::new(config_with(targets, dir)).unwrap())
    }

    #[tokio::test]
    async fn status_returns_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(dir.path());
        monitor
            .record(vec![check("web", HealthState::Up, 12.0), check("db", HealthState::Down, 1000.0)])
            .await;

        let body = get_json(create_router(monitor.clone(), dir.path()), "/api/status").await;
        assert_eq!(body["summaries"]["web"]["uptime_percentage"], 100.0);
        assert_eq!(body["summaries"]["web"]["avg_response_time"], 12.0);
        assert_eq!(body["summaries"]["db"]["down_count"], 1);
        assert_eq!(body["recent_checks"].as_array().unwrap().len(), 2);
        assert_eq!(body["recent_alerts"][0]["severity"], "critical");
        assert!(body["as_of"].is_string());
    }

    #[tokio::test]
    async fn health_reports_engine_counts() {
        let dir = tempfile::tempdir().unwrap();
        let monitor = monitor(dir.path());
        monitor.record(vec![check("web", HealthState::Up, 1.0)]).await;

        let body = get_json(create_router(monitor, dir.path()), "/api/health").await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["target_count"], 2);
        assert_eq!(body["total_checks_recorded"], 1);
    }

    #[tokio::test]
    async fn serves_dashboard_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Uptime</h1>").unwrap();

        let response = create_router(monitor(dir.path()), dir.path())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"<h1>Uptime</h1>");
    }
}

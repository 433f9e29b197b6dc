pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analysis::Classifier;
use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared, read-only state for every request.
pub struct AppState {
    pub classifier: Classifier,
    /// Artificial latency before an analyze response; cosmetic only
    pub response_delay: Duration,
}

/// Build the HTTP router. When `static_dir` is set, paths the API does not
/// handle are served from it, falling back to its `index.html`.
pub fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/demos", get(handlers::list_demos))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => api,
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP service until Ctrl-C.
pub async fn serve(config: &ServerConfig, classifier: Classifier) -> Result<(), ServerError> {
    let state = Arc::new(AppState {
        classifier,
        response_delay: Duration::from_millis(config.response_delay_ms),
    });
    let app = router(state, config.static_dir.as_deref());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!(
        addr = %addr,
        delay_ms = config.response_delay_ms,
        static_dir = ?config.static_dir,
        "diff-focus listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::handlers::ErrorBody;
    use super::*;
    use crate::report::{AnalysisReport, FlagKind, RiskLevel};
    use std::net::SocketAddr;

    /// Start the router on an ephemeral port and return its base URL.
    async fn spawn_app(static_dir: Option<&Path>) -> String {
        let state = Arc::new(AppState {
            classifier: Classifier::new(),
            response_delay: Duration::ZERO,
        });
        let app = router(state, static_dir);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_app(None).await;
        let body = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_analyze_returns_report() {
        let base = spawn_app(None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/analyze", base))
            .json(&serde_json::json!({ "diff": "+DROP TABLE users;\n+Auth::login();" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let report: AnalysisReport = response.json().await.unwrap();
        assert_eq!(report.risk_level, RiskLevel::High);
        let kinds: Vec<FlagKind> = report.flags.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, vec![FlagKind::Danger, FlagKind::Warning]);
        assert_eq!(report.summary, vec!["General logic update."]);
    }

    #[tokio::test]
    async fn test_analyze_wire_shape() {
        let base = spawn_app(None).await;
        let value: serde_json::Value = reqwest::Client::new()
            .post(format!("{}/api/analyze", base))
            .json(&serde_json::json!({ "diff": "+console.log('x')" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(value["riskLevel"], "Low");
        assert_eq!(value["flags"][0]["type"], "info");
        assert_eq!(value["flags"][0]["msg"], "Debug code (console.log) detected.");
        assert_eq!(value["fileTypes"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_analyze_without_diff_is_bad_request() {
        let base = spawn_app(None).await;
        let client = reqwest::Client::new();
        for body in [
            serde_json::json!({}),
            serde_json::json!({ "diff": null }),
            serde_json::json!({ "diff": "" }),
            serde_json::json!({ "diff": false }),
            serde_json::json!({ "diff": 0 }),
        ] {
            let response = client
                .post(format!("{}/api/analyze", base))
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{body}");
            let error: ErrorBody = response.json().await.unwrap();
            assert_eq!(error.error, "No diff provided");
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_string_diff() {
        let base = spawn_app(None).await;
        let client = reqwest::Client::new();
        for body in [
            serde_json::json!({ "diff": true }),
            serde_json::json!({ "diff": 42 }),
            serde_json::json!({ "diff": ["DROP TABLE x;"] }),
        ] {
            let response = client
                .post(format!("{}/api/analyze", base))
                .json(&body)
                .send()
                .await
                .unwrap();
            assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY, "{body}");
            let error: ErrorBody = response.json().await.unwrap();
            assert_eq!(error.error, "diff must be a string");
        }
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_json_body() {
        let base = spawn_app(None).await;
        let response = reqwest::Client::new()
            .post(format!("{}/api/analyze", base))
            .body("diff --git a/x b/x")
            .send()
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_list_demos() {
        let base = spawn_app(None).await;
        let demos: Vec<serde_json::Value> = reqwest::get(format!("{}/api/demos", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(demos.len(), crate::demos::DEMOS.len());
        assert_eq!(demos[0]["key"], "high-risk-auth");
        assert!(demos[0]["diff"].as_str().unwrap().contains("Auth::"));
    }

    #[tokio::test]
    async fn test_static_dir_falls_back_to_index() {
        let dir = std::env::temp_dir().join(format!("diff-focus-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<h1>Diff-Focus</h1>").unwrap();
        std::fs::write(dir.join("app.js"), "console.log('app')").unwrap();

        let base = spawn_app(Some(&dir)).await;
        let asset = reqwest::get(format!("{}/app.js", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(asset, "console.log('app')");

        let page = reqwest::get(format!("{}/some/client/route", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(page, "<h1>Diff-Focus</h1>");

        let health = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(health, "ok");

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_bind_error_is_reported() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            port: taken.local_addr().unwrap().port(),
            response_delay_ms: 0,
            ..ServerConfig::default()
        };
        let err = serve(&config, Classifier::new()).await.unwrap_err();
        assert!(matches!(err, ServerError::Bind { .. }));
    }
}

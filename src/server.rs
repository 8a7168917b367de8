use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;
use std::time::Duration;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::AppState;
use crate::api;
use crate::config::AppConfig;
use crate::drive::GoogleDriveClient;

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let backend = GoogleDriveClient::from_config(&config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialize Drive backend: {e}"))?;

    // Surface a dead credential in the logs immediately; transient token
    // endpoint downtime must not keep the service from starting.
    match backend.authenticate().await {
        Ok(()) => info!(
            name: "drive.authenticated",
            "Drive service account authenticated"
        ),
        Err(e) => tracing::warn!(error = %e, "Startup credential check failed"),
    }

    let state = AppState {
        backend: Arc::new(backend),
        config: Arc::clone(&config),
    };

    let request_timeout = Duration::from_secs(config.resilience.request_timeout_secs);

    // Build router
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(
            move |req: Request, next: Next| {
                let duration = request_timeout;
                async move {
                    match tokio::time::timeout(duration, next.run(req)).await {
                        Ok(res) => res,
                        Err(_) => {
                            (StatusCode::REQUEST_TIMEOUT, "Request timed out").into_response()
                        }
                    }
                }
            },
        ))
        .with_state(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "Server started"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

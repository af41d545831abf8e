use crate::config::RelayConfig;
use crate::registry::SessionRegistry;
use crate::relay::Relay;
use crate::signaling::{ConnectionTable, SignalingService, handle_socket};
use anyhow::Context;
use axum::Router;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::{Request, State, WebSocketUpgrade};
use axum::http::HeaderValue;
use axum::http::header::CONTENT_TYPE;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::info;

const RELAY_CHANNEL_CAPACITY: usize = 256;

/// Start the relay actor on the current runtime and return the handle the
/// WebSocket tasks talk to.
pub fn spawn_relay(registry: Box<dyn SessionRegistry>) -> SignalingService {
    let connections = Arc::new(ConnectionTable::new());
    let (relay_tx, relay_rx) = mpsc::channel(RELAY_CHANNEL_CAPACITY);

    let relay = Relay::new(registry, relay_rx, connections.clone());
    tokio::spawn(relay.run());

    SignalingService::new(relay_tx, connections)
}

#[derive(Clone)]
struct AppState {
    service: SignalingService,
    assets: ServeDir,
}

/// WebSocket upgrades on any path go to the relay; every other request is
/// answered from `public_dir`.
pub fn build_router(service: SignalingService, public_dir: impl AsRef<Path>) -> Router {
    let state = AppState {
        service,
        assets: ServeDir::new(public_dir),
    };

    Router::new()
        .fallback(relay_or_asset)
        .layer(middleware::map_response(html_utf8))
        .with_state(state)
}

/// Bind `config`'s address and serve until `shutdown` resolves.
pub async fn serve<F>(
    config: &RelayConfig,
    registry: Box<dyn SessionRegistry>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let service = spawn_relay(registry);
    let app = build_router(service, &config.public_dir);

    info!(
        "Signaling relay listening on http://{} (serving {})",
        listener.local_addr()?,
        config.public_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    info!("Signaling relay stopped");
    Ok(())
}

async fn relay_or_asset(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<AppState>,
    request: Request,
) -> Response {
    match ws {
        Ok(ws) => ws
            .on_upgrade(move |socket| handle_socket(socket, state.service))
            .into_response(),
        Err(_) => match state.assets.oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
    }
}

async fn html_utf8(mut response: Response) -> Response {
    let is_html = response
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"text/html"));

    if is_html {
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
    }
    response
}

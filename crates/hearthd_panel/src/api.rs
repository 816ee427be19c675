use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::panel::DeviceEntitiesPanel;
use crate::rows::RowId;

/// Response for the /v1/ping endpoint
#[derive(Serialize)]
struct PingResponse {
    status: String,
}

/// Response for the /v1/info endpoint
#[derive(Serialize)]
struct InfoResponse {
    version: String,
    hostname: String,
    device: String,
}

/// Shared application state
struct AppState {
    version: &'static str,
    panel: Mutex<DeviceEntitiesPanel>,
}

/// Handler for GET /v1/ping
#[tracing::instrument]
async fn ping() -> impl IntoResponse {
    tracing::debug!("Handling /v1/ping request");
    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Handler for GET /v1/info
#[tracing::instrument(skip(state))]
async fn info(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    tracing::debug!("Handling /v1/info request");

    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());
    let device = state.panel.lock().await.device_name().to_string();

    (
        StatusCode::OK,
        Json(InfoResponse {
            version: state.version.to_string(),
            hostname,
            device,
        }),
    )
}

/// Handler for GET /v1/panel
#[tracing::instrument(skip(state))]
async fn panel_view(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let panel = state.panel.lock().await;
    (StatusCode::OK, Json(panel.view()))
}

/// Handler for POST /v1/panel/disabled/toggle
#[tracing::instrument(skip(state))]
async fn toggle_disabled(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut panel = state.panel.lock().await;
    let expanded = panel.toggle_disabled();
    tracing::debug!("Disabled entities expanded: {}", expanded);
    (StatusCode::OK, Json(panel.view()))
}

/// Handler for POST /v1/panel/rows/:row_id/more-info
#[tracing::instrument(skip(state))]
async fn row_more_info(
    State(state): State<Arc<AppState>>,
    Path(row_id): Path<u64>,
) -> StatusCode {
    let mut panel = state.panel.lock().await;
    match panel.row(RowId::new(row_id)) {
        Some(row) => row.more_info(),
        None => return StatusCode::NOT_FOUND,
    }
    panel.handle_more_info();
    StatusCode::ACCEPTED
}

/// Handler for POST /v1/panel/entries/:entity_id/edit
#[tracing::instrument(skip(state))]
async fn edit_entry(
    State(state): State<Arc<AppState>>,
    Path(entity_id): Path<String>,
) -> StatusCode {
    let panel = state.panel.lock().await;
    if panel.open_entry(&entity_id) {
        StatusCode::ACCEPTED
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Handler for POST /v1/panel/add-to-view
#[tracing::instrument(skip(state))]
async fn add_to_view(State(state): State<Arc<AppState>>) -> StatusCode {
    state.panel.lock().await.add_to_view();
    StatusCode::ACCEPTED
}

/// Create the API router with all endpoints
fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/ping", get(ping))
        .route("/v1/info", get(info))
        .route("/v1/panel", get(panel_view))
        .route("/v1/panel/disabled/toggle", post(toggle_disabled))
        .route("/v1/panel/rows/:row_id/more-info", post(row_more_info))
        .route("/v1/panel/entries/:entity_id/edit", post(edit_entry))
        .route("/v1/panel/add-to-view", post(add_to_view))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP API server for a single panel
///
/// This function will bind to the specified address and serve the API endpoints.
/// It will run until the provided shutdown signal is triggered.
///
/// # Arguments
/// * `listen` - The IP address to listen on (e.g., "127.0.0.1")
/// * `port` - The port to listen on (e.g., 8565)
/// * `panel` - The panel to serve; requests are serialized through a mutex
/// * `shutdown_rx` - A oneshot receiver that will trigger graceful shutdown
pub async fn serve(
    listen: String,
    port: u16,
    panel: DeviceEntitiesPanel,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<(), Box<dyn std::error::Error>> {
    let version = env!("CARGO_PKG_VERSION");

    let state = Arc::new(AppState {
        version,
        panel: Mutex::new(panel),
    });
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", listen, port).parse()?;
    tracing::info!("Starting HTTP API server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_rx.await.ok();
            tracing::info!("HTTP API server shutting down gracefully");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::context::Context;
    use crate::context::EntityState;
    use crate::delegates::Delegates;
    use crate::panel::PanelInputs;
    use crate::registry::DisabledBy;
    use crate::registry::EntityRegistryEntry;

    fn router() -> Router {
        let inputs = PanelInputs {
            header: "Entities".to_string(),
            device_name: "Kitchen".to_string(),
            entities: vec![
                EntityRegistryEntry::new("light.kitchen"),
                EntityRegistryEntry::new("sensor.kitchen_temp").disabled_by(DisabledBy::User),
            ],
            show_disabled: false,
        };
        let context = Context::default().with_state(
            EntityState::new("light.kitchen", "on").with_attribute("friendly_name", "Kitchen Light"),
        );
        let panel = DeviceEntitiesPanel::new(inputs, Arc::new(context), Delegates::logging());

        create_router(Arc::new(AppState {
            version: "test",
            panel: Mutex::new(panel),
        }))
    }

    async fn send(app: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, json) = send(router(), "GET", "/v1/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_info_names_device() {
        let (status, json) = send(router(), "GET", "/v1/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["version"], "test");
        assert_eq!(json["device"], "Kitchen");
    }

    #[tokio::test]
    async fn test_panel_view() {
        let (status, json) = send(router(), "GET", "/v1/panel").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["header"], "Entities");
        assert_eq!(json["body"]["type"], "entities");
        assert_eq!(json["body"]["items"][0]["type"], "row");
        assert_eq!(json["body"]["items"][0]["name"], "Light");
        assert_eq!(json["body"]["disabled"]["toggle"], "+1 disabled entity");
    }

    #[tokio::test]
    async fn test_toggle_disabled() {
        let (status, json) = send(router(), "POST", "/v1/panel/disabled/toggle").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["body"]["disabled"]["expanded"], true);
        assert_eq!(
            json["body"]["disabled"]["entries"][0]["entity_id"],
            "sensor.kitchen_temp"
        );
        assert_eq!(json["body"]["disabled"]["toggle"], "Hide disabled");
    }

    #[tokio::test]
    async fn test_edit_hidden_entry_not_found() {
        let (status, _) = send(router(), "POST", "/v1/panel/entries/sensor.kitchen_temp/edit").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_row_more_info() {
        let (status, _) = send(router(), "POST", "/v1/panel/rows/0/more-info").await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (status, _) = send(router(), "POST", "/v1/panel/rows/99/more-info").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_add_to_view() {
        let (status, _) = send(router(), "POST", "/v1/panel/add-to-view").await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}

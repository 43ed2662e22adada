//! HTTP API consumed by the dashboard views
//!
//! Handlers return the same view-state objects the pages hold: the dashboard
//! view with its generation and optional error banner, the station snapshot,
//! and the session state with its resolved role. Rendering is not this
//! layer's concern.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analytics::AnalyticsEmitter;
use crate::config::AeroCastConfig;
use crate::dashboard::{Dashboard, DashboardView};
use crate::models::SensorStation;
use crate::report::GeminiReportClient;
use crate::session::{AuthUser, IdentityClient, Role};
use crate::stations::StationDirectory;

/// Shared service state behind the router
pub struct AppState {
    pub dashboard: Dashboard,
    pub identity: IdentityClient,
    pub stations: StationDirectory,
    pub analytics: AnalyticsEmitter,
}

impl AppState {
    #[must_use]
    pub fn new(config: &AeroCastConfig) -> Self {
        let analytics = AnalyticsEmitter::new();
        let provider = Arc::new(GeminiReportClient::new(
            config.api_key.clone(),
            config.model.clone(),
        ));

        Self {
            dashboard: Dashboard::new(provider, analytics.clone()),
            identity: IdentityClient::new(),
            stations: StationDirectory::new(),
            analytics,
        }
    }
}

#[derive(Deserialize)]
pub struct ApiSyncRequest {
    pub location: String,
}

#[derive(Deserialize)]
pub struct ApiCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ApiBroadcastRequest {
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    pub uid: String,
    pub email: String,
    pub role: Role,
    pub role_label: &'static str,
    pub is_administrator: bool,
}

impl From<&AuthUser> for ApiUser {
    fn from(user: &AuthUser) -> Self {
        Self {
            uid: user.uid.clone(),
            email: user.email.clone(),
            role: user.role,
            role_label: user.role.label(),
            is_administrator: user.role.is_administrator(),
        }
    }
}

#[derive(Serialize)]
pub struct ApiSession {
    pub authenticated: bool,
    pub user: Option<ApiUser>,
}

impl ApiSession {
    fn from_current(user: Option<&AuthUser>) -> Self {
        Self {
            authenticated: user.is_some(),
            user: user.map(ApiUser::from),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/sync", post(sync_dashboard))
        .route("/stations", get(get_stations))
        .route("/session", get(get_session))
        .route("/session/sign-in", post(sign_in))
        .route("/session/sign-up", post(sign_up))
        .route("/session/sign-out", post(sign_out))
        .route("/broadcast", post(broadcast))
        .with_state(state)
}

async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard.view())
}

/// Runs one location query. Acquisition failures do not fail the request;
/// they arrive as the view's error banner so the page can offer Reconnect.
async fn sync_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiSyncRequest>,
) -> Json<DashboardView> {
    Json(state.dashboard.sync(&request.location).await)
}

async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SensorStation>>, StatusCode> {
    state
        .analytics
        .emit("screen_view", &[("screen_name", "AdminDashboard")]);

    let stations = state.stations.refresh().await.map_err(|e| {
        warn!("Station snapshot failed: {e}");
        StatusCode::BAD_GATEWAY
    })?;
    Ok(Json(stations))
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<ApiSession> {
    Json(ApiSession::from_current(
        state.identity.current_user().as_ref(),
    ))
}

async fn sign_in(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<ApiCredentials>,
) -> Result<Json<ApiSession>, (StatusCode, String)> {
    let user = state
        .identity
        .sign_in(&credentials.email, &credentials.password)
        .await
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.user_message()))?;
    Ok(Json(ApiSession::from_current(Some(&user))))
}

async fn sign_up(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<ApiCredentials>,
) -> Result<Json<ApiSession>, (StatusCode, String)> {
    let user = state
        .identity
        .sign_up(&credentials.email, &credentials.password)
        .await
        .map_err(|e| (StatusCode::UNAUTHORIZED, e.user_message()))?;
    Ok(Json(ApiSession::from_current(Some(&user))))
}

async fn sign_out(State(state): State<Arc<AppState>>) -> Json<ApiSession> {
    state.identity.sign_out();
    Json(ApiSession::from_current(None))
}

async fn broadcast(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ApiBroadcastRequest>,
) -> Result<StatusCode, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    state.analytics.emit(
        "admin_broadcast",
        &[("message_length", &request.message.len().to_string())],
    );
    Ok(StatusCode::OK)
}

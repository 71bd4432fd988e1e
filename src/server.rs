/**
 * HTTP surface
 * Pattern comparison, behavioral analysis, enrollment and login
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::auth::{AuthService, LoginOutcome};
use crate::behavior::BehavioralProfile;
use crate::credentials::{InMemoryCredentialStore, UserSummary};
use crate::error::AuthError;
use crate::gesture::{CapturePayload, Gesture, GestureRecord, Point};
use crate::pattern::PatternService;
use crate::scorer::ComparisonResult;

#[derive(Clone)]
pub struct AppState {
    pub patterns: Arc<PatternService>,
    pub auth: Arc<AuthService<InMemoryCredentialStore>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub reference: Option<CapturePayload>,
    #[serde(default)]
    pub candidate: Option<CapturePayload>,
    pub threshold: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub timestamps: Vec<u64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub pattern: CapturePayload,
    #[serde(default)]
    pub confirm_pattern: Option<CapturePayload>,
    pub symbols: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternCheckRequest {
    pub username: String,
    #[serde(default)]
    pub pattern: Option<CapturePayload>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    #[serde(default)]
    pub pattern: Option<CapturePayload>,
    pub symbols: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn status_for(error: &AuthError) -> StatusCode {
    match error {
        AuthError::UserExists => StatusCode::CONFLICT,
        AuthError::UserNotFound => StatusCode::NOT_FOUND,
        AuthError::PatternMismatch { .. } | AuthError::SymbolMismatch => StatusCode::UNAUTHORIZED,
        AuthError::ConfirmationMismatch { .. }
        | AuthError::InvalidSymbols { .. }
        | AuthError::UsernameTooShort { .. }
        | AuthError::TooFewPoints { .. }
        | AuthError::InvalidPattern(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn api_error(error: AuthError) -> ApiError {
    (
        status_for(&error),
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pattern/compare", post(pattern_compare))
        .route("/pattern/analyze", post(pattern_analyze))
        .route("/auth/register", post(auth_register))
        .route("/auth/pattern", post(auth_pattern))
        .route("/auth/login", post(auth_login))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn pattern_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Json<ComparisonResult> {
    let reference = Gesture::from(request.reference);
    let candidate = Gesture::from(request.candidate);
    Json(state.patterns.compare(&reference, &candidate, request.threshold))
}

async fn pattern_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<Option<BehavioralProfile>> {
    Json(state.patterns.analyze(&request.points, &request.timestamps))
}

async fn auth_register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserSummary>), ApiError> {
    info!("Registration request: username={}", request.username);

    let pattern = GestureRecord::try_from(request.pattern)
        .map_err(|e| api_error(AuthError::from(e)))?;
    let confirm = Gesture::from(request.confirm_pattern);

    let summary = state
        .auth
        .register(&request.username, &request.email, pattern, &confirm, request.symbols)
        .await
        .map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(summary)))
}

async fn auth_pattern(
    State(state): State<AppState>,
    Json(request): Json<PatternCheckRequest>,
) -> Result<Json<ComparisonResult>, ApiError> {
    info!("Pattern check request: username={}", request.username);

    let candidate = Gesture::from(request.pattern);
    let comparison = state
        .auth
        .verify_pattern(&request.username, &candidate)
        .await
        .map_err(api_error)?;

    Ok(Json(comparison))
}

async fn auth_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>, ApiError> {
    info!("Login request: username={}", request.username);

    let candidate = Gesture::from(request.pattern);
    let outcome = state
        .auth
        .login(&request.username, &candidate, &request.symbols)
        .await
        .map_err(api_error)?;

    Ok(Json(outcome))
}

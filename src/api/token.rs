use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::{post, MethodRouter},
    Json, Router,
};

use crate::config::CorsPolicy;
use crate::error::{AppError, Result};
use crate::models::{TokenRequestBody, TokenResponse};
use crate::state::AppState;

pub const TOKEN_PATH: &str = "/api/token";

/// Token routes. The bare OPTIONS route only exists when a CORS policy is active.
pub fn token_routes(policy: &CorsPolicy) -> Router<AppState> {
    let mut route: MethodRouter<AppState> = post(issue_token);
    if *policy != CorsPolicy::None {
        route = route.options(preflight);
    }

    Router::new().route(TOKEN_PATH, route)
}

/// OPTIONS /api/token - headers are added by the CORS layers
async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// POST /api/token - exchange a room id and username for a signed access token
async fn issue_token(State(state): State<AppState>, body: Bytes) -> Result<Json<TokenResponse>> {
    // Unparseable bodies carry no usable fields
    let request = serde_json::from_slice::<TokenRequestBody>(&body)
        .ok()
        .and_then(TokenRequestBody::into_join_request)
        .ok_or(AppError::Validation)?;

    let token = state
        .tokens
        .issue(&request.room_id, &request.username, &request.username)?;

    tracing::info!(
        room_id = %request.room_id,
        identity = %request.username,
        "Access token issued"
    );

    Ok(Json(TokenResponse { token }))
}

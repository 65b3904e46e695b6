pub mod cors;
pub mod health;
pub mod token;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the HTTP router with all routes and the configured CORS policy
pub fn create_router(state: AppState) -> Router {
    let policy = state.config.cors.clone();

    let router = Router::new()
        .merge(token::token_routes(&policy))
        .merge(health::health_routes())
        .with_state(state);

    cors::apply(router, &policy).layer(TraceLayer::new_for_http())
}

pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowHeaders, CorsLayer};

use crate::profile::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Result<Router> {
    let cors = build_cors_layer(&state.config.allowed_origins())?;

    Ok(Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/profile",
            get(handlers::handle_get_profile).put(handlers::handle_update_profile),
        )
        .route("/api/projects", get(handlers::handle_list_projects))
        .route("/api/skills/top", get(handlers::handle_top_skills))
        .route("/api/search", get(handlers::handle_search))
        .layer(cors)
        .with_state(state))
}

/// CORS layer restricted to the configured origins. An unparsable origin fails startup.
pub fn build_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::PUT, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

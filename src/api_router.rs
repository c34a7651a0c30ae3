//! Combines the module routers into the full application router: bearer
//! auth on everything under `/api`, uploads served statically, tracing and
//! permissive CORS on the outside.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::contacts;
use crate::image;
use crate::shared::state::AppState;

pub fn configure_api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(contacts::api::configure_contacts_routes())
        .route("/image", post(image::upload_image))
        .route("/auth/validate-token", get(auth::validate_token))
        .layer(middleware::from_fn_with_state(state, auth::require_auth))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let uploads_dir = state.config.uploads.dir.clone();

    Router::new()
        .nest("/api", configure_api_routes(state.clone()))
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

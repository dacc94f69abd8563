pub mod auth;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    core::state::AppState,
    handlers::health::health_check,
    routes::{auth::auth_routes, services::service_routes},
    utils::global_error_handler::global_error_handler,
};

pub fn create_routers(state: Arc<AppState>) -> Router<()> {
    let api_routes = Router::new()
        .nest("/services", service_routes())
        .route("/health", get(health_check))
        .merge(auth_routes());

    Router::new()
        .nest("/api", api_routes)
        .fallback(global_error_handler)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

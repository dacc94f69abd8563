use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{core::state::AppState, handlers::auth::get_me};

pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new().route("/me", get(get_me))
}

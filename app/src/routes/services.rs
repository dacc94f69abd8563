use std::sync::Arc;

use axum::{routing::get, Router};

use crate::{
    core::state::AppState,
    handlers::services::{
        create_service, delete_service, get_service, list_services, update_service,
    },
};

pub fn service_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/:service_id",
            get(get_service)
                .patch(update_service)
                .put(update_service)
                .delete(delete_service),
        )
}

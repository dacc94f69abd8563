use axum::Json;
use serde::Serialize;

use crate::{middlewares::auth::AuthUser, models::user::Model as User};

#[derive(Debug, Serialize)]
pub struct MeResponse {
    user: User,
}

pub async fn get_me(AuthUser(user): AuthUser) -> Json<MeResponse> {
    Json(MeResponse { user })
}

use std::sync::Arc;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::error;

use crate::{
    core::state::AppState,
    models::user::Model as User,
    repos::users::UsersRepo,
    utils::{jwt::verify_jwt, response::APIError},
};

/// The authenticated principal.
///
/// Taking this as a handler argument is the access check: extraction fails
/// with 401 before the handler body, or its request payload, is touched.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = APIError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(tok) => tok,
            None => {
                error!("Auth Failed, Missing or invalid authorization header");
                return Err(APIError::UnAuthorized);
            }
        };

        let claims = verify_jwt(token, &state.config.jwt_secret).map_err(|e| {
            error!("Auth Failed, Invalid token: {}", e);
            APIError::UnAuthorized
        })?;

        let users_repo = UsersRepo::new(state.database.clone());
        let user = users_repo.get_by_email(&claims.sub).await.map_err(|e| {
            error!("User not found: {}", e);
            APIError::UnAuthorized
        })?;

        Ok(AuthUser(user))
    }
}

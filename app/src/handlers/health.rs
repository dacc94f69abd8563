use crate::utils::response::APIResponse;

pub async fn health_check() -> APIResponse {
    APIResponse::OK
}

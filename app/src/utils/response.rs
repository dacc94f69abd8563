use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

pub enum APIResponse {
    OK,
    Message(&'static str),
    NotFound(String),
}

impl IntoResponse for APIResponse {
    fn into_response(self) -> Response {
        match self {
            Self::OK => Json(json!({"status": "ok"})).into_response(),
            Self::Message(message) => (StatusCode::OK, Json(Message { message })).into_response(),
            Self::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                Json(json!({"status": "error", "details": msg})),
            )
                .into_response(),
        }
    }
}

#[derive(Debug)]
pub enum APIError {
    BadRequest(String),
    UnAuthorized,
    NotFound(String),
    Validation(ValidationErrors),
    InternalServerError(String),
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                Json(json!({"status": "error", "details": msg})),
            )
                .into_response(),
            Self::UnAuthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({"status": "error", "details": "Unauthenticated."})),
            )
                .into_response(),
            Self::NotFound(msg) => APIResponse::NotFound(msg).into_response(),
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "status": "error",
                    "details": "The given data was invalid.",
                    "errors": field_messages(&errors),
                })),
            )
                .into_response(),
            Self::InternalServerError(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "details": msg})),
            )
                .into_response(),
        }
    }
}

impl From<ValidationErrors> for APIError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<JsonRejection> for APIError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for APIError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<DbErr> for APIError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => {
                error!("Database error: {}", other);
                Self::InternalServerError("Database error".to_string())
            }
        }
    }
}

/// Flattens validator output into `{field: [message, ...]}`.
fn field_messages(errors: &ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("The {} field is invalid ({}).", field, e.code),
                })
                .collect();
            (field.to_string(), json!(messages))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::field_error;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_errors_are_listed_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", field_error("length", "The title must be at least 3 characters."));

        let response = APIError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(
            body["errors"]["title"][0],
            "The title must be at least 3 characters."
        );
    }

    #[tokio::test]
    async fn missing_record_maps_to_not_found() {
        let response =
            APIError::from(DbErr::RecordNotFound("Service not found".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["details"], "Service not found");
    }

    #[tokio::test]
    async fn other_database_errors_are_internal() {
        let response = APIError::from(DbErr::Custom("boom".to_string())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn bad_request_is_json() {
        let response = APIError::BadRequest("Malformed body".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], "error");
        assert_eq!(body["details"], "Malformed body");
    }

    #[tokio::test]
    async fn message_response_shape() {
        let response = APIResponse::Message("Service Created").into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Service Created");
    }
}

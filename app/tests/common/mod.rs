#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::{
    faker::{
        address::en::{CityName, StateName, StreetName, ZipCode},
        lorem::en::Sentence,
    },
    Fake,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::Value;
use tower::ServiceExt;

use services_directory::{
    config::config::Config,
    core::state::AppState,
    models::{listing::Model as Listing, user::Model as User},
    routes::create_routers,
    utils::jwt::create_jwt,
};

pub const JWT_SECRET: &str = "test-secret";

pub fn config() -> Config {
    Config {
        database_url: "postgres://localhost/services_test".to_string(),
        port: 8000,
        server_ip: std::net::IpAddr::from([127, 0, 0, 1]),
        max_connections: 1,
        min_connections: 1,
        jwt_secret: JWT_SECRET.to_string(),
        default_radius_km: 25.0,
        search_case_sensitive: true,
        seed_user_email: None,
        seed_user_name: None,
    }
}

pub fn app(db: DatabaseConnection) -> Router {
    create_routers(Arc::new(AppState::new(db, config())))
}

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Ana".to_string(),
        email: "ana@example.com".to_string(),
        created_at: Utc::now().naive_utc(),
    }
}

pub fn bearer(user: &User) -> String {
    let token = create_jwt(user.email.clone(), user.id.clone(), JWT_SECRET, 1)
        .expect("token should encode");
    format!("Bearer {}", token)
}

/// A listing with faked address details, like a model factory would build.
pub fn listing(id: &str, title: &str, latitude: Option<f64>, longitude: Option<f64>) -> Listing {
    let now = Utc::now().naive_utc();
    Listing {
        id: id.to_string(),
        title: title.to_string(),
        description: Sentence(4..10).fake(),
        address: StreetName().fake(),
        city: CityName().fake(),
        state: StateName().fake(),
        zipcode: ZipCode().fake(),
        latitude,
        longitude,
        created_at: now,
        updated_at: now,
    }
}

pub fn buenos_aires_office() -> Listing {
    listing("ba", "Buenos Aires Office", Some(-34.61), Some(-58.42))
}

pub fn nyc_office() -> Listing {
    listing("nyc", "NYC Office", Some(40.7128), Some(-74.0060))
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build")
}

pub fn json_request(method: &str, uri: &str, auth: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(auth) = auth {
        builder = builder.header("authorization", auth);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use sims_api::auth::jwt::JwtConfig;
use sims_api::config::ServerConfig;
use sims_api::router::build_app_router;
use sims_api::state::AppState;

/// Secret shared by the test config and tests that mint tokens by hand.
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Key held by the operator inserted by the seed migration.
pub const SEED_KEY: &str = "123456";

/// Build a test `ServerConfig` with safe defaults.
///
/// Images go to a per-process directory under the system temp dir; upload
/// tests override it with their own temporary directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        images_dir: std::env::temp_dir().join(format!("sims-test-images-{}", std::process::id())),
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_secs: 3600,
            verify_current_key: false,
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// over the given database pool.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied configuration.
pub fn build_test_app_with(pool: SqlitePool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Config whose images are written to `dir`.
pub fn config_with_images_dir(dir: PathBuf) -> ServerConfig {
    ServerConfig {
        images_dir: dir,
        ..test_config()
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn with_auth(builder: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    builder.header("authorization", format!("Bearer {token}"))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = with_auth(Request::builder().uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_with_header(app: Router, uri: &str, authorization: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = with_auth(Request::builder().method("POST").uri(uri), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = with_auth(Request::builder().method("PUT").uri(uri), token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = with_auth(Request::builder().method("DELETE").uri(uri), token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a multipart body built by [`multipart_body`].
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    boundary: &str,
    body: Vec<u8>,
    token: &str,
) -> Response {
    let request = with_auth(Request::builder().method("POST").uri(uri), token)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

/// Encode a `multipart/form-data` body with text fields and at most one file.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Auth helpers
// ---------------------------------------------------------------------------

/// Exchange `key` via `/registerKey`, asserting success, and return the body.
pub async fn register_key(app: Router, key: &str) -> serde_json::Value {
    let response = post_json(app, "/registerKey", serde_json::json!({ "key": key })).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Exchange the seed operator's key and return a bearer token.
pub async fn seed_token(app: Router) -> String {
    let json = register_key(app, SEED_KEY).await;
    json["token"].as_str().unwrap().to_string()
}

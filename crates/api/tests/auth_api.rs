//! HTTP-level integration tests for key exchange and token verification.
//!
//! Tests cover the exchange response, key rotation, single use of keys
//! (sequential and concurrent), replacement-key collisions, bearer header
//! handling, bad signatures, expired tokens, and strict current-key
//! verification.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, build_test_app, build_test_app_with, get, get_auth, get_with_header,
    post_form, post_json, register_key, test_config, SEED_KEY, TEST_SECRET,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use sims_api::auth::exchange::exchange_key_with;
use sims_api::auth::jwt::Claims;
use sims_api::error::AppError;
use sims_core::credential::{is_well_formed_key, MAX_ROTATION_ATTEMPTS};
use sims_core::error::CoreError;
use sims_db::models::user::CreateUser;
use sims_db::repositories::UserRepo;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user_with_key(pool: &SqlitePool, key: &str) -> sims_db::models::user::User {
    let input = CreateUser {
        first_name: "Kim".to_string(),
        last_name: "Lee".to_string(),
        pin: "4321".to_string(),
        token: key.to_string(),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

fn sign(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Key exchange
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_root_banner(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "SIMS Server");
}

/// Exchanging the seed key returns a token plus the user's profile, and the
/// stored key is replaced by a fresh 10-digit key.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_key_success(pool: SqlitePool) {
    let app = build_test_app(pool.clone());

    let json = register_key(app, SEED_KEY).await;

    assert!(json["token"].is_string(), "response must contain token");
    assert_eq!(json["expires_in"], 3600);
    assert_eq!(json["first_name"], "Admin");
    assert_eq!(json["last_name"], "Operator");
    assert_eq!(json["pin"], "0000");

    let id = json["id"].as_i64().unwrap();
    let stored = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_ne!(stored.token, SEED_KEY);
    assert!(is_well_formed_key(&stored.token));
}

/// Browser-style form posts (`key=...`) are accepted like JSON bodies.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_key_form_body(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = post_form(app.clone(), "/registerKey", &format!("key={SEED_KEY}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string());
    assert_eq!(json["first_name"], "Admin");

    let response = get_auth(app, "/testToken", json["token"].as_str().unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_key_reuse_rejected(pool: SqlitePool) {
    let app = build_test_app(pool);

    register_key(app.clone(), SEED_KEY).await;

    let response = post_json(app, "/registerKey", serde_json::json!({ "key": SEED_KEY })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_CREDENTIAL");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_unknown_key(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/registerKey", serde_json::json!({ "key": "nope" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_empty_key_rejected(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = post_json(app, "/registerKey", serde_json::json!({ "key": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

/// The rotated key can itself be exchanged exactly once.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotated_key_chain(pool: SqlitePool) {
    let user = create_user_with_key(&pool, "246810").await;
    let app = build_test_app(pool.clone());

    register_key(app.clone(), "246810").await;
    let next = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap().token;

    let json = register_key(app.clone(), &next).await;
    assert_eq!(json["id"], user.id);

    let response = post_json(app, "/registerKey", serde_json::json!({ "key": next })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Two simultaneous exchanges of the same key: exactly one gets a token.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_exchange_single_success(pool: SqlitePool) {
    create_user_with_key(&pool, "135790").await;
    let app = build_test_app(pool);
    let body = serde_json::json!({ "key": "135790" });

    let (a, b) = tokio::join!(
        post_json(app.clone(), "/registerKey", body.clone()),
        post_json(app.clone(), "/registerKey", body.clone()),
    );

    let mut statuses = [a.status().as_u16(), b.status().as_u16()];
    statuses.sort_unstable();
    assert_eq!(statuses, [200, 404]);
}

// ---------------------------------------------------------------------------
// Replacement-key collisions
// ---------------------------------------------------------------------------

/// A replacement that collides with another user's key is retried with a
/// fresh one.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_colliding_replacement_is_retried(pool: SqlitePool) {
    create_user_with_key(&pool, "5555555555").await;
    let user = create_user_with_key(&pool, "246810").await;
    let config = test_config();

    let mut calls = 0;
    let exchanged = exchange_key_with(&pool, "246810", &config.jwt, |_| {
        calls += 1;
        let key = if calls == 1 { "5555555555" } else { "7777777777" };
        key.to_string()
    })
    .await
    .expect("second replacement should succeed");

    assert_eq!(calls, 2);
    assert_eq!(exchanged.user.id, user.id);
    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.token, "7777777777");
}

/// When every replacement collides the exchange is a conflict and the
/// presented key stays usable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exhausted_replacements_leave_key_in_place(pool: SqlitePool) {
    create_user_with_key(&pool, "5555555555").await;
    let user = create_user_with_key(&pool, "246810").await;
    let config = test_config();

    let mut calls = 0;
    let result = exchange_key_with(&pool, "246810", &config.jwt, |_| {
        calls += 1;
        "5555555555".to_string()
    })
    .await;

    assert!(matches!(result, Err(AppError::Core(CoreError::Conflict(_)))));
    assert_eq!(calls, MAX_ROTATION_ATTEMPTS);
    let stored = UserRepo::find_by_token(&pool, "246810").await.unwrap();
    assert_eq!(stored.map(|u| u.id), Some(user.id));

    let app = build_test_app(pool);
    let json = register_key(app, "246810").await;
    assert_eq!(json["id"], user.id);
}

// ---------------------------------------------------------------------------
// Token verification
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_valid(pool: SqlitePool) {
    let app = build_test_app(pool);
    let token = common::seed_token(app.clone()).await;

    let response = get_auth(app, "/testToken", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Token is valid");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_missing_header_is_401(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get(app, "/testToken").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_scheme_is_401(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get_with_header(app, "/testToken", "Token abc").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_garbage_token_is_403(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get_auth(app, "/testToken", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_wrong_signature_is_403(pool: SqlitePool) {
    let app = build_test_app(pool);
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        key: SEED_KEY.to_string(),
        sub: 1,
        iat: now,
        exp: now + 600,
        jti: "forged".to_string(),
    };
    let token = sign(&claims, "some-other-secret");

    let response = get_auth(app, "/getUsers", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_token_is_403(pool: SqlitePool) {
    let app = build_test_app(pool);
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        key: SEED_KEY.to_string(),
        sub: 1,
        iat: now - 600,
        exp: now - 300,
        jti: "expired".to_string(),
    };
    let token = sign(&claims, TEST_SECRET);

    let response = get_auth(app, "/getInfo", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A token is refused as soon as `exp` passes, with no grace window.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_just_expired_token_is_403(pool: SqlitePool) {
    let app = build_test_app(pool);
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        key: SEED_KEY.to_string(),
        sub: 1,
        iat: now - 3630,
        exp: now - 30,
        jti: "just-expired".to_string(),
    };
    let token = sign(&claims, TEST_SECRET);

    let response = get_auth(app, "/testToken", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

/// In the default mode an issued token outlives later rotations of the key.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_survives_rotation(pool: SqlitePool) {
    let app = build_test_app(pool.clone());
    let first = register_key(app.clone(), SEED_KEY).await;
    let token = first["token"].as_str().unwrap().to_string();

    let id = first["id"].as_i64().unwrap();
    let next = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap().token;
    register_key(app.clone(), &next).await;

    let response = get_auth(app, "/testToken", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Strict mode: once the user exchanges again, the earlier token is refused.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strict_mode_rejects_superseded_token(pool: SqlitePool) {
    let mut config = test_config();
    config.jwt.verify_current_key = true;
    let app = build_test_app_with(pool.clone(), config);

    let first = register_key(app.clone(), SEED_KEY).await;
    let old_token = first["token"].as_str().unwrap().to_string();

    let response = get_auth(app.clone(), "/testToken", &old_token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let id = first["id"].as_i64().unwrap();
    let next = UserRepo::find_by_id(&pool, id).await.unwrap().unwrap().token;
    let second = register_key(app.clone(), &next).await;
    let new_token = second["token"].as_str().unwrap().to_string();

    let response = get_auth(app.clone(), "/testToken", &old_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/testToken", &new_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Strict mode: a token for a deleted user is refused.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_strict_mode_rejects_deleted_user(pool: SqlitePool) {
    let user = create_user_with_key(&pool, "975310").await;
    let mut config = test_config();
    config.jwt.verify_current_key = true;
    let app = build_test_app_with(pool.clone(), config);

    let json = register_key(app.clone(), "975310").await;
    let token = json["token"].as_str().unwrap().to_string();

    UserRepo::delete(&pool, user.id).await.unwrap();

    let response = get_auth(app, "/testToken", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

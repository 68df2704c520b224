pub mod auth;
pub mod health;
pub mod image;
pub mod info;
pub mod message;
pub mod model;
pub mod size;
pub mod transaction;
pub mod user;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the API route tree. All routes are mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /registerKey                         key exchange (public)
/// /testToken                           token check
///
/// /getUsers, /getUser[/{id}]           users
/// /addUser, /updateUser/{id}
/// /deleteUser/{id}, /changePin
///
/// /getModels, /addModel                product models
/// /updateModel/{id}, /deleteModel/{id}
///
/// /getSizes, /addSize                  sizes and stock
/// /updateStock/{id}, /deleteSize/{id}
///
/// /getTransactions, /addTransaction    sales
/// /getMessages, /addMessage            messages
/// /getInfo                             statistics roll-up
///
/// /uploadImage                         model picture upload
/// /images/{file}                       uploaded pictures (public)
/// ```
///
/// Everything except `/registerKey` and `/images` requires a bearer token;
/// handlers enforce it through the [`AuthUser`](crate::middleware::auth::AuthUser)
/// extractor.
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(user::router())
        .merge(model::router())
        .merge(size::router())
        .merge(transaction::router())
        .merge(message::router())
        .merge(info::router())
        .merge(image::router(&config.images_dir, config.max_upload_bytes))
}

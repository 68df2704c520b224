//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource. Handlers
//! delegate to the corresponding repository in `sims_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod image;
pub mod info;
pub mod message;
pub mod model;
pub mod size;
pub mod transaction;
pub mod user;

//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row (with `Serialize` when the
//!   row can be returned as-is)
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the table is mutable
//!
//! Tables with 0/1 flag columns decode into a private `*Row` struct first and
//! convert to the public entity, turning the integers into `bool`.

pub mod info;
pub mod message;
pub mod model;
pub mod size;
pub mod transaction;
pub mod user;

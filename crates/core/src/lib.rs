//! Domain logic shared by the SIMS database and API crates.
//!
//! Nothing in here performs I/O: key generation, upload naming, and the
//! statistics roll-up are pure functions so they can be unit tested directly.

pub mod credential;
pub mod error;
pub mod pagination;
pub mod stats;
pub mod types;
pub mod upload;

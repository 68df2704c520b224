//! Authentication primitives.
//!
//! - [`jwt`] -- bearer token generation and validation.
//! - [`exchange`] -- the rotating shared-key exchange.

pub mod exchange;
pub mod jwt;

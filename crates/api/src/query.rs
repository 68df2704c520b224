//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use sims_core::types::DbId;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the handlers via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameters for list endpoints that support an `include_inactive` flag.
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}

/// `?id=` lookup, for clients that pass the id as a query parameter.
#[derive(Debug, Deserialize)]
pub struct IdParams {
    pub id: DbId,
}

/// Optional `?pid=` filter on size listings.
#[derive(Debug, Deserialize)]
pub struct SizeFilterParams {
    pub pid: Option<DbId>,
}

//! Limit/offset clamping for paginated list endpoints.

/// Page size used when the client does not send `limit`.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 500;

/// Clamp a user-provided limit to `[1, max]`, defaulting to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 50);
        assert_eq!(clamp_limit(Some(10_000), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 500);
        assert_eq!(clamp_limit(Some(0), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 1);
        assert_eq!(clamp_limit(Some(25), DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE), 25);
    }

    #[test]
    fn offset_is_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-3)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }
}

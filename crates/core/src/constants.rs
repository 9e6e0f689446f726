//! Shared constants for habitlog.
//!
//! Centralizes limits that are checked in more than one crate.

/// Access token lifetime (15 minutes).
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Refresh token lifetime (7 days).
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Minimum byte length of the token signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Name of the httpOnly cookie carrying the refresh token.
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Maximum substance name length, in characters.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum habit entry text length, in characters.
pub const MAX_TEXT_LEN: usize = 1000;

/// Upper bound for a single dose.
pub const MAX_DOSE: f64 = 10_000.0;

/// Days before today covered by the default pivot (10 buckets total).
pub const DEFAULT_PIVOT_DAYS: u32 = 9;

/// Largest accepted pivot lookback.
pub const MAX_PIVOT_DAYS: u32 = 365;

/// Hours before the current hour covered by the default histogram.
pub const DEFAULT_HISTOGRAM_HOURS: u32 = 23;

/// Largest accepted histogram lookback (one week).
pub const MAX_HISTOGRAM_HOURS: u32 = 168;

/// Number of entries returned by the "recent" listing when no limit is given.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Largest accepted "recent" limit.
pub const MAX_RECENT_LIMIT: usize = 100;

/// Default r2d2 pool size for the SQLite store.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Origin allowed by CORS when none is configured.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

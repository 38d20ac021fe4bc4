//! Exit codes for cardctl

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when the query is not a full name
pub const EXIT_QUERY_REJECTED: i32 = 64;

/// Exit code when a diagnostic command cannot reach its backend
pub const EXIT_BACKEND_UNAVAILABLE: i32 = 70;

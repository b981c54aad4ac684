//! Stable exit codes for the laraforge CLI.

/// Bootstrap completed.
pub const OK: i32 = 0;
/// Missing precondition, failed external command, or other error.
pub const ERROR: i32 = 1;
/// The database never became reachable within the configured wait policy.
pub const DB_WAIT_TIMEOUT: i32 = 2;

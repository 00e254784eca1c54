//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, body size limiting, and
//! response compression.

use std::time::Duration;

/// Default per-request timeout, used when the configured value is absent.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on JSON request bodies.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

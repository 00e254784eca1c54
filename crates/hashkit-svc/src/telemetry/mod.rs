//! Telemetry initialisation: structured JSON logs.
//!
//! # Telemetry invariants
//!
//! - **No key material, plaintext, or tokens** in any log field. Failures are
//!   logged by error kind only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init_logging;

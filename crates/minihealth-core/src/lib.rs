//! minihealth core: error taxonomy and wire payload types.
//!
//! This crate defines the error surface and the JSON response bodies shared by
//! the server and by integration tests. It intentionally carries no transport
//! or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `HealthError`/`Result` so the serving
//! process does not crash while answering probes.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod payload;

/// Shared result type.
pub use error::{HealthError, Result};

//! Top-level facade crate for minihealth.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use minihealth_core::*;
}

pub mod server {
    pub use minihealth_server::*;
}

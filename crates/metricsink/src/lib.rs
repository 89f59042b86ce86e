//! Top-level facade crate for metricsink.
//!
//! Re-exports core types and the server library so users can depend on a single crate.

pub mod core {
    pub use metricsink_core::*;
}

pub mod server {
    pub use metricsink_server::*;
}

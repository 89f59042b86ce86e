//! metricsink server library entry.
//!
//! Wires config, storage, handlers, and the recovery layer into an axum
//! service. It is consumed by the binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app_state;
pub mod config;
pub mod context;
pub mod handlers;
pub mod obs;
pub mod recovery;
pub mod router;
pub mod storage;

//! Per-request context derived from the connection rather than the body.

pub mod client_ip;

pub use client_ip::{client_ip, parse_ip};

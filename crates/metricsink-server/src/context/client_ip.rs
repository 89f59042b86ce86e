use std::net::SocketAddr;

use axum::extract::ConnectInfo;

/// Host part of a `host:port` remote address, if it is an IP literal.
/// Anything else is logged and mapped to an empty string.
pub fn parse_ip(remote_addr: &str) -> String {
    match remote_addr.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(_) => {
            tracing::warn!("userip: {remote_addr:?} is not IP:port");
            String::new()
        }
    }
}

/// Source IP of the current connection. Missing connect info is not fatal.
pub fn client_ip(connect: Option<ConnectInfo<SocketAddr>>) -> String {
    match connect {
        Some(ConnectInfo(addr)) => parse_ip(&addr.to_string()),
        None => {
            tracing::warn!("no connection info on request, storing empty ip");
            String::new()
        }
    }
}

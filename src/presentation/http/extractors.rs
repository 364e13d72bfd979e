//! Custom Extractors
//!
//! Client address resolution and path id parsing shared by handlers and
//! middleware.

use std::net::{IpAddr, SocketAddr};

use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};

use crate::shared::error::AppError;
use crate::shared::snowflake;

/// Best-effort client address: first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then the socket peer.
pub fn resolve_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<IpAddr> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .and_then(|ip| ip.trim().parse().ok());

    forwarded
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .and_then(|ip| ip.trim().parse().ok())
        })
        .or_else(|| peer.map(|addr| addr.ip()))
}

/// Client address of the request, `None` when it cannot be determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);
        Ok(ClientIp(resolve_client_ip(&parts.headers, peer)))
    }
}

/// Parse a snowflake id taken from a path or query string.
pub fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw)
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid {} id", what)))
}

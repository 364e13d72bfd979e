//! Credential endpoint throttling.
//!
//! A Redis sorted-set sliding window per client IP and scope. Without Redis,
//! or when a Redis call fails, requests pass through unthrottled.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use once_cell::sync::Lazy;
use redis::aio::ConnectionManager;

use crate::config::RateLimitSettings;
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::resolve_client_ip;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// KEYS[1] = window key; ARGV = now_ms, window_ms, budget.
/// Replies `{admitted, count, retry_after_ms}`.
static SLIDING_WINDOW: Lazy<redis::Script> = Lazy::new(|| {
    redis::Script::new(
        r#"
local key = KEYS[1]
local now_ms = tonumber(ARGV[1])
local window_ms = tonumber(ARGV[2])
local budget = tonumber(ARGV[3])

redis.call('ZREMRANGEBYSCORE', key, '-inf', now_ms - window_ms)
local count = redis.call('ZCARD', key)

if count >= budget then
    local oldest = redis.call('ZRANGE', key, 0, 0, 'WITHSCORES')
    local wait = 0
    if #oldest == 2 then
        wait = tonumber(oldest[2]) + window_ms - now_ms
    end
    return {0, count, wait}
end

redis.call('ZADD', key, now_ms, now_ms .. '-' .. math.random(1000000))
redis.call('PEXPIRE', key, window_ms + 1000)
return {1, count + 1, 0}
"#,
    )
});

/// Throttled endpoint group. Each has its own key space and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitScope {
    /// `/auth/*`
    Auth,
    /// `/nucleus/login`
    NucleusLogin,
}

impl LimitScope {
    fn label(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::NucleusLogin => "nucleus",
        }
    }

    fn budget(self, settings: &RateLimitSettings) -> u32 {
        match self {
            Self::Auth => settings.auth_requests_per_window,
            Self::NucleusLogin => settings.nucleus_requests_per_window,
        }
    }
}

/// Result of charging one request against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub admitted: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Unix seconds at which the current window has fully rolled over
    pub reset_at: i64,
    /// Whole seconds to wait before retrying, zero when admitted
    pub retry_after: u64,
}

impl Quota {
    fn from_reply(reply: &[i64], limit: u32, reset_at: i64) -> Self {
        let admitted = reply.first().map_or(true, |flag| *flag == 1);
        let used = reply.get(1).copied().unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32;
        let wait_ms = reply.get(2).copied().unwrap_or(0).max(0) as u64;

        Self {
            admitted,
            limit,
            remaining: if admitted { limit.saturating_sub(used) } else { 0 },
            reset_at,
            retry_after: if admitted { 0 } else { wait_ms.div_ceil(1000) },
        }
    }

    fn unmetered(limit: u32, reset_at: i64) -> Self {
        Self {
            admitted: true,
            limit,
            remaining: limit,
            reset_at,
            retry_after: 0,
        }
    }

    fn write_headers(&self, headers: &mut HeaderMap) {
        headers.insert("x-ratelimit-limit", HeaderValue::from(self.limit));
        headers.insert("x-ratelimit-remaining", HeaderValue::from(self.remaining));
        headers.insert("x-ratelimit-reset", HeaderValue::from(self.reset_at));
        if !self.admitted {
            headers.insert(header::RETRY_AFTER, HeaderValue::from(self.retry_after));
        }
    }
}

/// Charge one request for `client` in `scope`.
pub async fn charge(
    redis: &ConnectionManager,
    scope: LimitScope,
    client: &str,
    settings: &RateLimitSettings,
) -> Quota {
    let limit = scope.budget(settings);
    let window_ms = settings.window_seconds.saturating_mul(1000);
    let now_ms = Utc::now().timestamp_millis();
    let reset_at = now_ms / 1000 + settings.window_seconds as i64;

    let mut conn = redis.clone();
    let reply: Result<Vec<i64>, _> = SLIDING_WINDOW
        .key(format!("rl:{}:{}", scope.label(), client))
        .arg(now_ms)
        .arg(window_ms)
        .arg(limit)
        .invoke_async(&mut conn)
        .await;

    match reply {
        Ok(reply) => Quota::from_reply(&reply, limit, reset_at),
        Err(e) => {
            tracing::error!(scope = scope.label(), client, error = %e, "Rate limiter unavailable");
            Quota::unmetered(limit, reset_at)
        }
    }
}

pub async fn rate_limit_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    throttle(LimitScope::Auth, state, request, next).await
}

pub async fn rate_limit_nucleus(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    throttle(LimitScope::NucleusLogin, state, request, next).await
}

/// Limiter key for a request: resolved client IP, or `unknown`.
fn client_key(request: &Request) -> String {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    resolve_client_ip(request.headers(), peer)
        .map(|ip| ip.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn throttle(scope: LimitScope, state: AppState, request: Request, next: Next) -> Response {
    let Some(redis) = state.redis.as_ref() else {
        return next.run(request).await;
    };

    let client = client_key(&request);

    let quota = charge(redis, scope, &client, &state.settings.rate_limit).await;

    let mut response = if quota.admitted {
        next.run(request).await
    } else {
        tracing::warn!(
            scope = scope.label(),
            client = %client,
            retry_after = quota.retry_after,
            "Rate limit exceeded"
        );
        metrics::record_rate_limited(scope.label());
        AppError::RateLimited.into_response()
    };
    quota.write_headers(response.headers_mut());
    response
}

//! Health Handlers
//!
//! `GET /health`, `GET /health/live` and `GET /health/ready`.

use std::future::Future;
use std::time::{Duration, Instant};

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::cache;
use crate::startup::AppState;

const DATABASE_SLOW_AFTER: Duration = Duration::from_millis(100);
const REDIS_SLOW_AFTER: Duration = Duration::from_millis(50);

static STARTED: Lazy<(Instant, DateTime<Utc>)> = Lazy::new(|| (Instant::now(), Utc::now()));

/// Pin the uptime origin to process startup rather than the first probe.
pub fn init_server_start() {
    Lazy::force(&STARTED);
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl ProbeStatus {
    fn worst(self, other: Self) -> Self {
        self.max(other)
    }

    fn http_status(self) -> StatusCode {
        match self {
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            Self::Healthy | Self::Degraded => StatusCode::OK,
        }
    }
}

/// Outcome of probing one backing service.
#[derive(Debug, Serialize)]
pub struct DependencyCheck {
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DependencyCheck {
    fn answered(elapsed: Duration, slow_after: Duration) -> Self {
        Self {
            status: if elapsed < slow_after {
                ProbeStatus::Healthy
            } else {
                ProbeStatus::Degraded
            },
            latency_ms: Some(elapsed.as_millis() as u64),
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: ProbeStatus::Unhealthy,
            latency_ms: None,
            message: Some(message),
        }
    }

    fn not_configured(what: &str) -> Self {
        Self {
            status: ProbeStatus::Degraded,
            latency_ms: None,
            message: Some(format!("{} not configured", what)),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatCheck {
    pub active_connections: usize,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub database: DependencyCheck,
    pub redis: DependencyCheck,
    pub chat: ChatCheck,
}

#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub status: ProbeStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// 503 only when the database is down. Redis backs rate limiting, which
/// fails open, so it can at most degrade the instance.
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessReport>) {
    let database = timed("Database", DATABASE_SLOW_AFTER, async {
        sqlx::query("SELECT 1").execute(&state.db).await.map(|_| ())
    })
    .await;

    let redis = match &state.redis {
        Some(conn) => timed("Redis", REDIS_SLOW_AFTER, cache::ping(conn)).await,
        None => DependencyCheck::not_configured("Redis"),
    };

    let status = overall_status(database.status, redis.status);
    let (started, started_at) = &*STARTED;

    let report = ReadinessReport {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: started.elapsed().as_secs(),
        started_at: started_at.to_rfc3339(),
        checks: ReadinessChecks {
            database,
            redis,
            chat: ChatCheck {
                active_connections: state.chat_hub.connection_count(),
            },
        },
    };

    (status.http_status(), Json(report))
}

async fn timed<F, E>(name: &str, slow_after: Duration, probe: F) -> DependencyCheck
where
    F: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    match probe.await {
        Ok(()) => DependencyCheck::answered(start.elapsed(), slow_after),
        Err(e) => {
            tracing::warn!(dependency = name, error = %e, "Readiness probe failed");
            DependencyCheck::failed(format!("{} connection failed: {}", name, e))
        }
    }
}

fn overall_status(database: ProbeStatus, redis: ProbeStatus) -> ProbeStatus {
    database.worst(redis.min(ProbeStatus::Degraded))
}

//! Cache Module
//!
//! Redis connection management. Redis backs the distributed rate limiter;
//! domain data is never cached.

use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}

/// Round-trip a PING; used by the readiness probe.
pub async fn ping(conn: &ConnectionManager) -> Result<(), redis::RedisError> {
    let mut conn = conn.clone();
    redis::cmd("PING").query_async::<String>(&mut conn).await?;
    Ok(())
}

//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Redis configuration. Rate limiting is disabled when absent.
    #[serde(default)]
    pub redis: Option<RedisSettings>,

    /// JWT authentication settings
    pub jwt: JwtSettings,

    /// Snowflake ID generator settings
    pub snowflake: SnowflakeSettings,

    /// Rate limiting configuration
    pub rate_limit: RateLimitSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Department chat configuration
    pub chat: ChatSettings,

    /// Seeder configuration
    pub seed: SeedSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,
}

/// JWT authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens
    pub secret: String,

    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,

    /// Nucleus (super-admin) access token expiry in minutes
    pub nucleus_token_expiry_minutes: i64,
}

/// Snowflake ID generator configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnowflakeSettings {
    /// Machine/worker ID (0-1023)
    pub machine_id: u16,

    /// Custom epoch timestamp in milliseconds
    pub epoch: u64,
}

/// Rate limiting configuration for the credential endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    /// Requests allowed per window and client on `/auth/*`
    pub auth_requests_per_window: u32,

    /// Requests allowed per window and client on the nucleus login
    pub nucleus_requests_per_window: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Department chat configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// Page size for history requests without a limit
    pub history_default_limit: i64,

    /// Upper bound for history page size
    pub history_max_limit: i64,

    /// Maximum message length in characters
    pub max_message_length: usize,
}

/// Seeder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedSettings {
    /// Email of the nucleus admin created by `tutor-db seed`
    pub nucleus_email: String,

    /// Initial password of the nucleus admin. Nothing is seeded when unset.
    #[serde(default)]
    pub nucleus_password: Option<String>,

    /// Display name of the nucleus admin
    pub nucleus_name: String,
}

/// Minimum required length for JWT secret (256 bits = 32 bytes)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if JWT secret is too short.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("jwt.access_token_expiry_minutes", 15)?
            .set_default("jwt.refresh_token_expiry_days", 7)?
            .set_default("jwt.nucleus_token_expiry_minutes", 30)?
            .set_default("snowflake.machine_id", 1)?
            .set_default("snowflake.epoch", 1704067200000_u64)? // 2024-01-01
            .set_default("rate_limit.auth_requests_per_window", 10)?
            .set_default("rate_limit.nucleus_requests_per_window", 5)?
            .set_default("rate_limit.window_seconds", 60)?
            .set_default("cors.allowed_origins", vec!["http://localhost:5173"])?
            .set_default("chat.history_default_limit", 50)?
            .set_default("chat.history_max_limit", 100)?
            .set_default("chat.max_message_length", 2000)?
            .set_default("seed.nucleus_email", "nucleus@tutor.local")?
            .set_default("seed.nucleus_name", "Nucleus Admin")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("jwt.secret", std::env::var("JWT_SECRET").ok())?
            .set_override_option(
                "snowflake.machine_id",
                std::env::var("SNOWFLAKE_MACHINE_ID").ok(),
            )?
            .set_override_option(
                "seed.nucleus_password",
                std::env::var("NUCLEUS_SEED_PASSWORD").ok(),
            )?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| settings.validated())
    }

    /// Reject configurations that would make token signing unsafe.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "JWT secret must be at least {} characters. Current length: {}",
                MIN_JWT_SECRET_LENGTH,
                self.jwt.secret.len()
            )));
        }
        if self.chat.history_max_limit < 1 {
            return Err(ConfigError::Message(
                "chat.history_max_limit must be at least 1".into(),
            ));
        }
        if self.chat.history_default_limit > self.chat.history_max_limit {
            return Err(ConfigError::Message(
                "chat.history_default_limit must not exceed chat.history_max_limit".into(),
            ));
        }
        Ok(self)
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Whether this instance runs in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

impl ChatSettings {
    /// Clamp a requested history page size into the configured bounds.
    pub fn clamp_limit(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.history_default_limit)
            .clamp(1, self.history_max_limit)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::test_settings;

    #[test]
    fn test_short_jwt_secret_rejected() {
        let mut settings = test_settings();
        settings.jwt.secret = "short".into();
        assert!(settings.validated().is_err());
    }

    #[test]
    fn test_zero_history_max_limit_rejected() {
        let mut settings = test_settings();
        settings.chat.history_max_limit = 0;
        settings.chat.history_default_limit = 0;
        let err = settings.validated().unwrap_err();
        assert!(err.to_string().contains("history_max_limit"));
    }

    #[test]
    fn test_history_limit_clamped() {
        let chat = test_settings().chat;
        assert_eq!(chat.clamp_limit(None), 50);
        assert_eq!(chat.clamp_limit(Some(500)), 100);
        assert_eq!(chat.clamp_limit(Some(0)), 1);
        assert_eq!(chat.clamp_limit(Some(20)), 20);
    }
}

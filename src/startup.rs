//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    AuthServiceImpl, ChatServiceImpl, CtaServiceImpl, DepartmentServiceImpl, NucleusServiceImpl,
    StubTestGenerator, TestGenerator,
};
use crate::config::Settings;
use crate::infrastructure::repositories::Repositories;
use crate::infrastructure::{cache, database};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::presentation::websocket::ChatHub;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// `None` when Redis is not configured or unreachable at startup
    pub redis: Option<ConnectionManager>,
    pub snowflake: Arc<SnowflakeGenerator>,
    pub chat_hub: Arc<ChatHub>,
    pub repos: Repositories,
    pub test_generator: Arc<dyn TestGenerator>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by PostgreSQL repositories on `db`.
    pub fn new(db: PgPool, redis: Option<ConnectionManager>, settings: Settings) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id as u64,
            settings.snowflake.epoch,
        ));

        Self {
            repos: Repositories::postgres(db.clone()),
            db,
            redis,
            snowflake,
            chat_hub: Arc::new(ChatHub::new()),
            test_generator: Arc::new(StubTestGenerator),
            settings: Arc::new(settings),
        }
    }

    pub fn auth_service(&self) -> AuthServiceImpl {
        AuthServiceImpl::new(
            self.repos.users.clone(),
            self.repos.sessions.clone(),
            self.snowflake.clone(),
            self.settings.jwt.clone(),
        )
    }

    pub fn department_service(&self) -> DepartmentServiceImpl {
        DepartmentServiceImpl::new(self.repos.departments.clone(), self.snowflake.clone())
    }

    pub fn cta_service(&self) -> CtaServiceImpl {
        CtaServiceImpl::new(
            self.repos.cta.clone(),
            self.repos.departments.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn chat_service(&self) -> ChatServiceImpl {
        ChatServiceImpl::new(
            self.repos.chat_messages.clone(),
            self.repos.departments.clone(),
            self.snowflake.clone(),
            self.settings.chat.clone(),
        )
    }

    pub fn nucleus_service(&self) -> NucleusServiceImpl {
        NucleusServiceImpl::new(self.repos.nucleus.clone(), self.settings.jwt.clone())
    }
}

/// Assemble the full router with its global layers.
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);

    routes::create_router(state).layer(
        ServiceBuilder::new()
            .layer(logging::create_trace_layer())
            .layer(cors)
            .layer(CompressionLayer::new()),
    )
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        // Create database pool
        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let redis = match &settings.redis {
            Some(redis_settings) => match cache::create_redis_client(redis_settings).await {
                Ok(conn) => {
                    tracing::info!("Redis connection established");
                    Some(conn)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Redis unavailable, rate limiting disabled");
                    None
                }
            },
            None => {
                tracing::info!("Redis not configured, rate limiting disabled");
                None
            }
        };

        handlers::health::init_server_start();

        let addr = settings.server_addr();
        let state = AppState::new(db, redis, settings);
        let router = build_router(state);

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self { listener, router })
    }

    /// Run the server until Ctrl-C
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(
            self.listener,
            self.router
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

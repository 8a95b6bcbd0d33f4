//! Jobportal - a small job-listing web application

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use jobportal::{
    api::{self, AppState},
    config::Config,
    db::{
        self,
        repositories::{SqlxJobRepository, SqlxUserRepository},
    },
    services::{JobService, TokenIssuer, UserService},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobportal=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting job portal...");

    // Load configuration
    let config = Config::load_with_env(Path::new("config.yml"))?;
    tracing::info!("Configuration loaded");

    // Initialize database
    let pool = db::create_pool(&config.database).await?;
    tracing::info!("Database connected: {}", config.database.url);

    // Run migrations
    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    // Wire up repositories and services
    let tokens = TokenIssuer::new(config.auth.secret.clone(), config.auth.token_ttl_minutes);
    let user_repo = SqlxUserRepository::shared(pool.clone());
    let job_repo = SqlxJobRepository::shared(pool.clone());
    let user_service = Arc::new(UserService::new(user_repo, tokens.clone()));
    let job_service = Arc::new(JobService::new(job_repo));

    let state = AppState {
        user_service,
        job_service,
        tokens,
    };

    let app = api::build_router(state, &config.server.cors_origin)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

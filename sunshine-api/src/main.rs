use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use chrono::Duration;
use sunshine_api::{app, state::{AppState, AuthConfig}, worker};
use sunshine_store::app_config::Config;
use sunshine_store::{DbClient, StoreAnalyticsRepository, StoreInventoryRepository, StoreScheduleRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunshine_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Sunshine Park API on port {}", config.server.port);

    let app_state = match &config.database.url {
        Some(url) => {
            let db = DbClient::new(url, config.database.max_connections)
                .await
                .context("Failed to connect to Postgres")?;
            if config.database.run_migrations {
                db.migrate().await.context("Failed to run migrations")?;
            }

            AppState::new(
                Arc::new(StoreInventoryRepository::new(db.pool.clone())),
                Arc::new(StoreScheduleRepository::new(db.pool.clone())),
                Arc::new(StoreAnalyticsRepository::new(db.pool.clone())),
                AuthConfig { secret: config.auth.jwt_secret.clone() },
                config.checkout.max_tickets_per_type,
            )
        }
        None => {
            tracing::warn!("No database configured, using in-memory demo data");
            let mut state = AppState::in_memory(&config.auth.jwt_secret);
            state.max_tickets_per_type = config.checkout.max_tickets_per_type;
            state
        }
    };

    let session_ttl = Duration::try_minutes(config.checkout.session_ttl_minutes)
        .context("checkout.session_ttl_minutes is out of range")?;
    let app_state = app_state.with_session_ttl(session_ttl);
    tokio::spawn(worker::start_session_sweeper(
        app_state.sessions.clone(),
        std::time::Duration::from_secs(config.checkout.sweep_interval_seconds.max(1)),
    ));

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

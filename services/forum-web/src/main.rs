//! forum-web 服务入口

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use forum_auth_core::{SessionAuthority, spawn_sweeper};
use forum_config::AppConfig;
use forum_web::{AppState, api, infrastructure::MemoryForumStore};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// `FORUM_SEED_USERS=email:nickname:password,...`
fn seed_users(store: &MemoryForumStore) -> anyhow::Result<()> {
    let Ok(raw) = std::env::var("FORUM_SEED_USERS") else {
        warn!("FORUM_SEED_USERS not set, in-memory store starts without users");
        return Ok(());
    };
    for entry in raw.split(',').filter(|entry| !entry.trim().is_empty()) {
        let mut parts = entry.trim().splitn(3, ':');
        let (Some(email), Some(nickname), Some(password)) =
            (parts.next(), parts.next(), parts.next())
        else {
            anyhow::bail!("malformed FORUM_SEED_USERS entry: {entry:?}");
        };
        let id = store.add_user(email, nickname, password)?;
        info!(user_id = %id, nickname, "Seeded user");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_dir = std::env::var("FORUM_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let config = AppConfig::load(&config_dir).context("failed to load configuration")?;

    forum_telemetry::init(&config.telemetry.log_level, config.telemetry.json);
    let metrics = forum_telemetry::init_metrics().context("failed to install metrics recorder")?;

    let sessions = Arc::new(SessionAuthority::new(config.session.ttl()));
    let store = Arc::new(MemoryForumStore::new());
    seed_users(&store)?;

    let shutdown = CancellationToken::new();
    let sweeper = spawn_sweeper(
        sessions.clone(),
        config.session.sweep_interval(),
        shutdown.clone(),
    );

    let state = AppState::new(&config.session, sessions, store).with_metrics(metrics);
    let app = api::router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server address")?;
    info!(
        %addr,
        app = %config.app_name,
        env = %config.app_env,
        session_ttl_secs = config.session.ttl_secs,
        "Starting forum-web"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let signal = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            signal.cancel();
        })
        .await?;

    shutdown.cancel();
    sweeper.await?;
    Ok(())
}

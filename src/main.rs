use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use blog_backend::config::Config;
use blog_backend::db::Database;
use blog_backend::security::TokenService;
use blog_backend::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Load configuration
    let config = Config::load()?;
    let secret = config.jwt.signing_secret()?;
    let ttl = config.jwt.token_ttl()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connections
    let db = Database::connect(&config).await?;
    db.run_migrations().await?;

    // Build application state
    let tokens = TokenService::new(&secret, ttl);
    let state = AppState::new(
        Arc::new(db.store()),
        Arc::new(tokens),
        config.pagination.clone(),
    );
    let app = build_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Starting server on {}", addr);

    let shutdown = Arc::new(Notify::new());
    let mut server = {
        let shutdown = shutdown.clone();
        tokio::spawn(
            axum::serve(listener, app)
                .with_graceful_shutdown(async move { shutdown.notified().await })
                .into_future(),
        )
    };

    tokio::select! {
        result = &mut server => {
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => {}
    }

    let grace = Duration::from_secs(config.server.shutdown_grace_secs);
    tracing::info!(grace_secs = grace.as_secs(), "Shutting down, draining in-flight requests");
    shutdown.notify_one();

    match tokio::time::timeout(grace, server).await {
        Ok(result) => {
            result??;
            tracing::info!("Server stopped");
        }
        Err(_) => {
            tracing::warn!("Grace period elapsed with requests still in flight; exiting");
        }
    }

    Ok(())
}

fn init_tracing() {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let fmt_layer = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_backend=debug,tower_http=debug".into()),
        )
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    }
}

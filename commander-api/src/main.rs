use anyhow::Context;
use commander_api::telemetry::init_tracing;
use commander_api::{ApiConfig, AppState, StorageBackend, build_router, sample_commands};
use commander_domain::persist::InMemoryCommandStore;
use tokio::net::TcpListener;
use tracing::{info, warn};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("unix signal handlers unavailable, falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

async fn serve(listener: TcpListener, app: axum::Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            wait_for_shutdown_signal().await;
            info!("shutdown signal received");
        })
        .await
        .context("http server failed")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    init_tracing(config.log_json);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("bind {}", config.bind_addr))?;
    info!(
        addr = %config.bind_addr,
        prefix = %config.route_prefix,
        storage = ?config.storage,
        "commander api listening"
    );

    match config.storage {
        StorageBackend::Memory => {
            let store = if config.seed_sample_data {
                InMemoryCommandStore::with_commands(sample_commands())?
            } else {
                InMemoryCommandStore::new()
            };
            serve(listener, build_router(AppState::new(store, &config))).await
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres => {
            use commander_domain::persist::PgCommandStore;

            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is not set")?;
            let store = PgCommandStore::connect(url, config.db_max_connections).await?;
            store.ensure_schema().await?;
            serve(listener, build_router(AppState::new(store, &config))).await
        }
        #[cfg(not(feature = "postgres"))]
        StorageBackend::Postgres => {
            anyhow::bail!("postgres storage requires the `postgres` feature")
        }
    }
}

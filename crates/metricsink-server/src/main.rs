//! metricsink server
//!
//! - `GET /health-check`, `POST /metrics`, `GET /report?filter=cpu|memory`
//! - SQLite storage at `<storage.dir>/wa.sqlite`
//! - Config from `metricsink.yaml` (or `$METRICSINK_CONFIG`) plus env overrides

use std::net::SocketAddr;

use metricsink_core::error::{MetricError, Result};
use metricsink_server::{app_state::AppState, config, obs, router, storage::MetricStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = config::load()?;
    obs::init_tracing(&cfg.log.level)?;

    if let Err(e) = run(cfg).await {
        tracing::error!("server failed to start - {e}");
        return Err(e);
    }
    Ok(())
}

async fn run(cfg: config::ServiceConfig) -> Result<()> {
    let listen = cfg.listen_addr()?;
    let table = cfg.storage.mode.table_name();
    if cfg.storage.mode == config::StorageMode::Testing {
        tracing::debug!("server is running in testing environment using table - {table}");
    }

    let mut store = MetricStore::connect(cfg.storage.db_path()).await?;
    store.initialize_schema(table).await?;

    let app = router::build_router(AppState::new(store));

    tracing::info!(%listen, "metricsink server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricError::Config(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MetricError::Internal(format!("server failed: {e}")))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("signal received, starting graceful shutdown");
}

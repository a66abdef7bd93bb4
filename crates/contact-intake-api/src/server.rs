//! Server bootstrap

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::routes::create_router;
use crate::state::{build_storage, AppState};

/// Build storage, bind and serve until a shutdown signal arrives
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let storage = build_storage(&config)
        .with_context(|| format!("failed to initialize {} storage", config.storage))?;
    let backend = storage.backend();

    let app = create_router(AppState::new(storage), &config);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(%addr, backend, "Contact intake server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Contact intake server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    tracing::info!("Shutdown signal received");
}

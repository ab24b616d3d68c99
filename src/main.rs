use std::net::{Ipv4Addr, SocketAddr, TcpListener};

use anyhow::Context;
use person_service::configuration::get_static_configuration;
use person_service::database::{get_database_connection, initialize_schema};
use person_service::telemetry::{get_subscriber, init_subscriber};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber(get_subscriber("person-service", "info", std::io::stdout))
        .context("failed to install tracing subscriber")?;

    let configuration = get_static_configuration().context("failed to load configuration")?;

    let pool = get_database_connection(&configuration.database, &configuration.pool)
        .await
        .context("failed to connect to postgres")?;
    initialize_schema(&pool)
        .await
        .context("failed to create the person table")?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, configuration.application_port));
    let listener =
        TcpListener::bind(address).with_context(|| format!("failed to bind {address}"))?;

    info!("Starting server at {address}...");
    person_service::run(listener, pool.clone(), shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to listen for SIGTERM");
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

    info!("Shutdown signal received");
}

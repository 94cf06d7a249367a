use std::time::Duration;

use clap::Parser;
use tracing::{info, warn};

use slashbot_server::api::{self, AppState};
use slashbot_server::config::SlashbotConfig;

/// Slack slash-command webhook server.
#[derive(Parser, Debug)]
#[command(name = "slashbot-server", about = "HTTP server answering Slack slash commands")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "slashbot.toml")]
    config: String,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from TOML file, or use defaults if the file does not exist.
    let (config, found) = SlashbotConfig::load(&cli.config)?;

    let telemetry_guard = slashbot_server::telemetry::init(&config.logging, &config.telemetry);

    if !found {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    let state = AppState::from_config(&config);
    info!(
        command_path = %state.command_path,
        max_body_bytes = state.max_body_bytes,
        "slash command route configured"
    );
    let app = api::router(state);

    // Resolve the bind address (CLI overrides take precedence).
    let host = cli.host.unwrap_or(config.server.host);
    let port = cli.port.unwrap_or(config.server.port);
    let addr = format!("{host}:{port}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "slashbot-server listening");

    // Serve until SIGINT / SIGTERM, then drain in-flight requests with a bounded wait.
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_rx.await.ok();
            })
            .await
    });

    tokio::select! {
        result = &mut server => result??,
        () = shutdown_signal() => {
            shutdown_tx.send(()).ok();
            let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_seconds);
            info!(
                timeout_secs = config.server.shutdown_timeout_seconds,
                "waiting for in-flight requests..."
            );
            match tokio::time::timeout(shutdown_timeout, &mut server).await {
                Ok(result) => result??,
                Err(_) => {
                    warn!(
                        timeout_secs = config.server.shutdown_timeout_seconds,
                        "shutdown timeout exceeded, dropping in-flight requests"
                    );
                    server.abort();
                }
            }
        }
    }

    telemetry_guard.shutdown();

    info!("slashbot-server shut down");
    Ok(())
}

/// Wait for SIGINT (Ctrl+C) or SIGTERM, then return to trigger graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { info!("received SIGINT"); }
        () = terminate => { info!("received SIGTERM"); }
    }
}

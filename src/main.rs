use calorie_compass::{AppState, Args, Config, serve, telemetry};
use clap::Parser;

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may supply GOOGLE_API_KEY; a missing file is fine
    let dotenv_path = dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::load(args)?;

    telemetry::init_telemetry()?;
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    tracing::debug!("{:?}", config);

    serve(AppState::with_gemini(config), shutdown_signal()).await
}

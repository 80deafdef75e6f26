use clap::Parser;
use filerepo::api;
use filerepo::config::Config;
use filerepo::utils::cli::Args;
use filerepo::utils::state::AppState;
use std::sync::Arc;
use tokio::signal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match Config::from_args(&args).await {
        Ok(config) => config,
        Err(validation_errors) => {
            eprintln!("{}", validation_errors.join("\n"));
            std::process::exit(1);
        }
    };
    let state = Arc::new(AppState::new(config));

    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", args.host, args.port))
        .await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}

use crate::config::Config;
use crate::service::VotingService;
use clap::{ArgAction, Parser};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod model;
mod routes;
mod service;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Read configuration from FILE (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Set verbosity level (repeat for more)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = log_level(args.verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rvote={level},tower_http={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(args.config.as_deref())?;
    let service = Arc::new(VotingService::new(config.authorization.tags.iter().cloned()));
    info!(
        tags = config.authorization.tags.len(),
        "voting service initialized"
    );

    let address = config.listen_address();
    let listener = TcpListener::bind(address)
        .await
        .wrap_err_with(|| format!("cannot bind to {address}"))?;
    info!(%address, "server running");

    axum::serve(listener, routes::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .wrap_err("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(0), "error");
    assert_eq!(log_level(2), "info");
    assert_eq!(log_level(7), "trace");
}

#[test]
fn test_args() {
    let args = Args::parse_from(["rvote", "-vv", "--config", "rvote.toml"]);
    assert_eq!(args.verbose, 2);
    assert_eq!(args.config, Some(PathBuf::from("rvote.toml")));
    let args = Args::parse_from(["rvote"]);
    assert_eq!(args.verbose, 0);
    assert!(args.config.is_none());
}

//! Cinema API server. `operate` serves HTTP; `install`/`uninstall` create or drop the tables.

use cinema_api::{app, ensure_database_exists, ensure_schema, install, uninstall, AppState, Config, Storage};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
enum Command {
    /// Start the HTTP server.
    #[default]
    Operate,
    /// Create the database tables.
    Install,
    /// Drop the database tables.
    Uninstall,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "REST API for movies and their screening schedules.")]
struct Cli {
    #[arg(value_enum, default_value_t = Command::Operate)]
    command: Command,

    /// JSON config file. When absent or unreadable, CINEMA_* environment variables are used.
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinema_api=info,tower_http=info,sqlx=warn")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "exiting");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::resolve(cli.config.as_deref())?;

    if cli.command == Command::Install {
        ensure_database_exists(&config.database).await?;
    }

    let storage = match Storage::connect(&config.database).await {
        Ok(storage) => storage,
        Err(e) => {
            tracing::error!(error = %e, "unable to initialize the database storage");
            return Err(e.into());
        }
    };

    let result = match cli.command {
        Command::Operate => operate(storage.clone(), &config).await,
        Command::Install => create_tables(&storage, &config).await,
        Command::Uninstall => drop_tables(&storage).await,
    };
    storage.disconnect().await;
    result
}

async fn operate(storage: Storage, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let router = app(AppState::new(storage), &config.server);
    let listener = TcpListener::bind(config.server.addr()?).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn create_tables(storage: &Storage, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    ensure_schema(storage, &config.database).await?;
    install(storage.pool()).await?;
    tracing::info!("tables created");
    Ok(())
}

async fn drop_tables(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    uninstall(storage.pool()).await?;
    tracing::info!("tables dropped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!(error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::warn!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::warn!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operate_is_the_default_command() {
        let cli = Cli::try_parse_from(["cinema-api"]).unwrap();
        assert_eq!(cli.command, Command::Operate);
        assert!(cli.config.is_none());
    }

    #[test]
    fn command_with_config_path() {
        let cli = Cli::try_parse_from(["cinema-api", "install", "/etc/cinema.json"]).unwrap();
        assert_eq!(cli.command, Command::Install);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/cinema.json")));
    }

    #[test]
    fn unknown_command_rejected() {
        assert!(Cli::try_parse_from(["cinema-api", "migrate"]).is_err());
    }
}

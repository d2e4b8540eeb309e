//! Palette Picker API server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌─────────┐    ┌────────────┐    ┌────────────┐    ┌───────┐
//!     ──────────────────▶│  http   │───▶│ validation │───▶│  handlers  │───▶│ store │──▶ SQLite
//!                        │ server  │    │ (422 early)│    │ projects / │    │       │
//!     ◀──────────────────│         │◀───│            │◀───│ palettes   │◀───│       │
//!     Client Response    └─────────┘    └────────────┘    └────────────┘    └───────┘
//!
//!     Cross-cutting: config (TOML + PALETTE_PICKER_ENV), observability (tracing, metrics),
//!                    lifecycle (signals, graceful shutdown)
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use palette_picker::config::{load_or_default, AppConfig, DatabaseProfile, Environment};
use palette_picker::lifecycle::{wait_for_signal, Shutdown};
use palette_picker::observability::{logging, metrics};
use palette_picker::{AppServer, Store};

#[derive(Parser)]
#[command(name = "palette-picker")]
#[command(about = "JSON API for projects and color palettes", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database profile (development, test, production). Overrides PALETTE_PICKER_ENV.
    #[arg(short, long)]
    env: Option<String>,

    /// Listen address, overriding the configured one.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// Apply pending schema migrations and exit
    Migrate,
    /// Reset the database to the sample data set and exit
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    let env = match cli.env {
        Some(name) => name.parse()?,
        None => Environment::from_env()?,
    };

    logging::init_logging(&config.observability);
    tracing::info!("palette-picker v{} starting", env!("CARGO_PKG_VERSION"));

    let profile = config.database_profile(env).clone();
    tracing::info!(
        environment = %env,
        database = %profile.url,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let store = Store::connect(&profile).await?;

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => store.migrate().await.map(|applied| {
            tracing::info!(applied, "Migrations complete");
        }),
        Command::Seed => match store.migrate().await {
            Ok(_) => store.seed().await,
            Err(e) => Err(e),
        },
        Command::Serve => {
            serve(config, &profile, store.clone()).await?;
            Ok(())
        }
    };

    store.close().await;
    result?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn serve(
    config: AppConfig,
    profile: &DatabaseProfile,
    store: Store,
) -> Result<(), Box<dyn std::error::Error>> {
    if profile.run_migrations {
        store.migrate().await?;
    }
    if profile.seed {
        store.seed_if_empty().await?;
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    AppServer::new(config, store).run(listener, server_shutdown).await?;
    Ok(())
}

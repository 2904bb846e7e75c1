//! StayHub — CLI
//!
//! Headless booking service suitable for deployment as a systemd service,
//! Docker container, or standalone process, plus maintenance commands.
//!
//! ```sh
//! # Run with default config (~/.config/stayhub/config.toml)
//! stayhub serve
//!
//! # Custom config path
//! stayhub serve --config /etc/stayhub/config.toml
//!
//! # Override the API port
//! stayhub serve --api-port 3000
//!
//! # Validate config without starting
//! stayhub serve --check
//!
//! # Collapse duplicate bookings and print a report
//! stayhub reconcile
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use stayhub::application::ReconciliationService;
use stayhub::config::AppConfig;
use stayhub::domain::RepositoryProvider;
use stayhub::server::{init_tracing, ServerHandle, ServerOptions};
use stayhub::{default_config_path, init_database, DatabaseConfig, SeaOrmRepositoryProvider};

/// StayHub — property-rental booking service.
#[derive(Parser, Debug)]
#[command(
    name = "stayhub",
    version,
    about = "Booking service for property rentals",
    long_about = "StayHub — REST API server for property rentals: listings, \
                  conflict-free booking admission, and duplicate-booking maintenance.\n\n\
                  Default config: ~/.config/stayhub/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "STAYHUB_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the REST API server (default).
    Serve {
        /// Override the REST API listen port.
        #[arg(long)]
        api_port: Option<u16>,

        /// Validate the configuration file and exit without starting.
        #[arg(long)]
        check: bool,

        /// Skip database migrations on startup.
        #[arg(long)]
        no_migrate: bool,

        /// Skip creating the bootstrap admin user.
        #[arg(long)]
        no_admin: bool,
    },
    /// Collapse duplicate bookings (same user, listing and dates) down to
    /// the earliest-created record, and print a report.
    Reconcile,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ──────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!(
                "Failed to load config from {}: {}",
                config_path.display(),
                e
            );
            error!("Using default configuration.");
            AppConfig::default()
        }
    };

    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
        config.logging.level = level.clone();
    }

    match cli.command.unwrap_or(Command::Serve {
        api_port: None,
        check: false,
        no_migrate: false,
        no_admin: false,
    }) {
        Command::Serve {
            api_port,
            check,
            no_migrate,
            no_admin,
        } => serve(config, config_path, api_port, check, no_migrate, no_admin).await,
        Command::Reconcile => reconcile(config).await,
    }
}

async fn serve(
    mut config: AppConfig,
    config_path: PathBuf,
    api_port: Option<u16>,
    check: bool,
    no_migrate: bool,
    no_admin: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(port) = api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    if check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!(
            "   API address : {}:{}",
            config.server.api_host, config.server.api_port
        );
        println!("   Database    : {}", config.database.connection_url());
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !no_migrate,
        create_default_admin: !no_admin,
    })
    .await?;

    handle.install_signal_handler();
    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}

async fn reconcile(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig {
        url: config.database.connection_url(),
    };
    let db = init_database(&db_config).await?;

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let service = ReconciliationService::new(repos);

    let report = service.reconcile().await?;

    if report.groups_found == 0 {
        println!("No duplicate bookings found.");
    } else {
        println!(
            "Reconciled {} duplicate group(s), deleted {} booking(s):",
            report.groups_found, report.total_deleted
        );
        for group in &report.groups {
            println!(
                "  user {} / listing {} / {}..{} -> kept #{}, deleted {:?}",
                group.key.user_id,
                group.key.listing_id,
                group.key.check_in,
                group.key.check_out,
                group.survivor_id,
                group.deleted_ids
            );
        }
    }

    db.close().await?;
    Ok(())
}

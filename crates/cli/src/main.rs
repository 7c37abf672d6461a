use clap::Parser;
use geoquery_domain::CliOverrides;
use geoquery_jobs::{CacheMaintenanceJob, JobRunner, WalCheckpointJob};
use std::net::{IpAddr, SocketAddr};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "geoquery")]
#[command(version)]
#[command(about = "geoquery - IP and hostname geolocation with a tiered lookup cache")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Web server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Origin lookup service base URL (the query is appended)
    #[arg(long)]
    origin_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        origin_url: cli.origin_url.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting geoquery v{}", env!("CARGO_PKG_VERSION"));

    let database_url = format!("sqlite:{}", config.database.path);
    let pool = bootstrap::init_database(&database_url, &config.database).await?;

    let services = di::Services::new(&config, pool.clone())?;

    let shutdown = CancellationToken::new();

    let mut jobs = JobRunner::new().with_shutdown_token(shutdown.clone());
    if config.cache.compaction_interval_secs > 0 && config.cache.expire_after_access().is_some() {
        jobs = jobs.with_cache_maintenance(
            CacheMaintenanceJob::new(services.maintenance_port())
                .with_interval(config.cache.compaction_interval_secs),
        );
    }
    if config.database.wal_checkpoint_interval_secs > 0 {
        jobs = jobs.with_wal_checkpoint(WalCheckpointJob::new(
            pool.clone(),
            config.database.wal_checkpoint_interval_secs,
        ));
    }
    jobs.start().await;

    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    let bind_ip: IpAddr = config.server.bind_address.parse()?;
    let web_addr = SocketAddr::new(bind_ip, config.server.web_port);

    let result =
        server::start_web_server(web_addr, services.app_state(), &config.server, shutdown.clone())
            .await;

    shutdown.cancel();
    pool.close().await;

    if let Err(ref e) = result {
        error!(error = %e, "Web server error");
    }
    info!("Server shutdown complete");
    result
}

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info, warn};

use gazette::feed::{FeedScheduler, HttpFeedFetcher};
use gazette::web::WebServer;
use gazette::{Config, Database};

#[tokio::main]
async fn main() -> ExitCode {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Load configuration
    let (mut config, load_error) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    // Initialize logging
    if let Err(e) = gazette::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        gazette::logging::init_console_only(&config.logging.level);
    }

    info!("Gazette - feed aggregator");
    if let Some(e) = load_error {
        warn!("Failed to load {}: {}; using default configuration", config_path, e);
    }
    config.apply_env_overrides();

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> gazette::Result<()> {
    config.validate()?;

    let db = Arc::new(
        Database::open(&config.database.path, config.database.max_connections).await?,
    );

    let scheduler = if config.scheduler.enabled {
        let fetcher = HttpFeedFetcher::new(&config.fetcher)?;
        let scheduler = FeedScheduler::new(Arc::clone(&db), Arc::new(fetcher), &config.scheduler);
        Some(scheduler.start())
    } else {
        info!("Feed scheduler disabled");
        None
    };

    let server = WebServer::new(&config.server, Arc::clone(&db))?;
    info!("Server configured on {}", server.addr());
    let served = server.run(shutdown_signal()).await;

    if let Some((handle, task)) = scheduler {
        handle.shutdown();
        if let Err(e) = task.await {
            error!("Feed scheduler task failed: {}", e);
        }
    }

    db.close().await;
    info!("Shutdown complete");
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

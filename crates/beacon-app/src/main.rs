mod cli;
mod workspaces;

use std::sync::Arc;
use std::time::Duration;

use beacon_config::BeaconConfig;
use beacon_presence::{EventHandlers, LogTransport, PresenceService};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str) {
    let mut filter = EnvFilter::from_default_env();
    for directive in beacon_config::directives_for(level) {
        match directive.parse::<Directive>() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("ignoring log directive {directive}: {e}"),
        }
    }
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(args: &cli::Args) -> Result<BeaconConfig, beacon_common::ConfigError> {
    match &args.config {
        Some(path) => beacon_config::load_config_at(path),
        None => beacon_config::load_config(),
    }
}

fn handlers() -> EventHandlers {
    EventHandlers::new()
        .on_ready(|| tracing::info!("Presence transport ready"))
        .on_disconnected(|code, message| {
            tracing::info!(code, reason = message, "Presence transport disconnected")
        })
        .on_errored(|code, message| {
            tracing::warn!(code, reason = message, "Presence transport error")
        })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::parse();

    // Logging needs the config's level, so load first and report afterwards.
    let loaded = load_config(&args);
    let level = match (&args.log_level, &loaded) {
        (Some(level), _) => level.clone(),
        (None, Ok(config)) => config.logging.level.as_filter().to_string(),
        (None, Err(_)) => "info".to_string(),
    };
    init_logging(&level);

    tracing::info!("Beacon v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        BeaconConfig::default()
    });
    tracing::debug!(config = %beacon_config::config_to_json(&config), "Config loaded");

    let service = PresenceService::new(&config, Arc::new(LogTransport::new()));

    for dir in &args.dirs {
        match workspaces::open_directory(dir) {
            Ok(entry) => {
                let key = entry.key().to_string();
                let files = entry.files().len();
                match service.workspace_opened(entry) {
                    Ok(()) => tracing::info!(workspace = %key, files, "Workspace opened"),
                    Err(e) => tracing::warn!("Failed to open workspace {key}: {e}"),
                }
            }
            Err(e) => tracing::warn!("Failed to read directory {}: {e}", dir.display()),
        }
    }

    if let Err(e) = service.start(handlers()) {
        tracing::error!("Presence failed to start: {e}");
        std::process::exit(1);
    }

    if args.print_snapshot {
        let snapshot = service.registry().snapshot_all();
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => tracing::warn!("Failed to serialize snapshot: {e}"),
        }
    }

    match args.linger {
        Some(secs) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
            }
        }
        None => {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for Ctrl-C: {e}");
            }
        }
    }

    if let Err(e) = service.stop() {
        tracing::error!("Presence failed to stop cleanly: {e}");
    }
    tracing::info!("Shutdown complete");
}

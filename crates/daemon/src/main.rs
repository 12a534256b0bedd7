// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stevedore daemon (svd)
//!
//! Background process that registers the configured depots and keeps
//! their sync rounds on schedule until signalled to stop.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod config;

use std::path::PathBuf;

use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::config::Config;
use sv_core::Scheduler;
use sv_sync::DepotRegistry;

const DEFAULT_CONFIG_PATH: &str = "svd.toml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let config_path = if args.len() > 1 {
        PathBuf::from(&args[1])
    } else {
        PathBuf::from(DEFAULT_CONFIG_PATH)
    };

    let config = Config::load(&config_path)?;
    let _log_guard = setup_logging(&config)?;

    info!(config = %config_path.display(), "starting svd");

    let scheduler = Scheduler::spawn();
    let registry = DepotRegistry::new(scheduler.clone());

    // A depot that fails to register does not stop the daemon; the rest
    // of the fleet still syncs.
    for depot in &config.depots {
        if let Err(e) = registry.add_depot(depot.descriptor()).await {
            error!(depot = %depot.name, error = %e, "failed to register depot");
        }
    }

    info!(depots = registry.len(), "daemon ready");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = sigterm.recv() => {
            info!("received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("received SIGINT, shutting down");
        }
    }

    scheduler.stop();
    info!("daemon stopped");
    Ok(())
}

fn setup_logging(
    config: &Config,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match &config.daemon.log_path {
        Some(log_path) => {
            let dir = log_path.parent().unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)?;
            let file_name = log_path
                .file_name()
                .ok_or_else(|| std::io::Error::other("log_path has no file name"))?;
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(non_blocking))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
            Ok(None)
        }
    }
}

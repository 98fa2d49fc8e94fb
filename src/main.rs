mod analytics;
mod config;
mod db;
mod models;
mod network;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    std::fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Failed to create data directory: {}", config.data_dir.display())
    })?;
    init_logging(&config)?;

    let mut db = db::Database::open(&config.db_path())?;
    if args.get(1).is_some_and(|cmd| cmd == "reset") {
        return run::reset(&mut db);
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let remote = Arc::new(store::SimulatedRemote::new(config.sync_delay));
    let store = {
        let _guard = runtime.enter();
        store::BudgetStore::hydrate(Box::new(db), remote, config.store_options())?
    };
    info!(online = store.is_online(), status = %store.sync_status(), "Budget store ready");

    if args.len() > 1 {
        return runtime.block_on(run::as_cli(&args, &store, &config));
    }

    let monitor = if config.offline {
        None
    } else {
        let _guard = runtime.enter();
        Some(network::spawn_monitor(
            store.clone(),
            config.probe_addr.clone(),
            config.probe_interval,
        ))
    };

    let result = run::as_tui(&store, runtime.handle().clone());
    if let Some(monitor) = monitor {
        monitor.abort();
    }
    runtime.block_on(store.flush())?;
    result
}

/// The TUI owns the terminal, so log lines go to a file in the data
/// directory. `RUST_LOG` overrides the default filter.
fn init_logging(config: &config::Config) -> Result<()> {
    let path = config.log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "budgetbox=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

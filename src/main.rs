// SPDX-License-Identifier: GPL-3.0-only
use tokio::signal;
use tracing::{error, info};

use pump_inotify::config::Config;
use pump_inotify::logging::setup_logging;
use pump_inotify::watcher::{InotifyWatcher, Watcher, WatcherEvent};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    setup_logging(&config.log_level)?;

    info!("Starting pump-inotify v{}", env!("CARGO_PKG_VERSION"));

    // Without inotify there is nothing to fall back to
    let bindings = match pump_inotify::init() {
        Ok(bindings) => bindings,
        Err(e) => {
            error!(error = %e, "Cannot start without inotify");
            return Err(e.into());
        }
    };
    for (name, mask) in bindings.iter() {
        info!(constant = name, bits = mask.bits(), "Event constant bound");
    }

    let mask = config.watch_mask()?;
    let mut watcher = InotifyWatcher::from_config(&config);
    let mut events = watcher.watch(&config.watch_paths, mask).await?;

    let watcher_task = tokio::spawn(async move {
        info!("Watcher task started");
        while let Some(event) = events.recv().await {
            match event {
                WatcherEvent::Create(path) => {
                    info!(path = %path.display(), "File created");
                }
                WatcherEvent::Delete(path) => {
                    info!(path = %path.display(), "File deleted");
                }
                WatcherEvent::Modify(path) => {
                    info!(path = %path.display(), "File modified");
                }
                WatcherEvent::MovedFrom { path, cookie } => {
                    info!(path = %path.display(), cookie, "File moved out");
                }
                WatcherEvent::MovedTo { path, cookie } => {
                    info!(path = %path.display(), cookie, "File moved in");
                }
            }
        }
    });

    info!("Watching {} directories. Waiting for shutdown signal...", config.watch_paths.len());

    // Wait for shutdown signal
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Received shutdown signal (Ctrl+C)");
        }
        Err(err) => {
            error!(error = %err, "Unable to listen for shutdown signal");
        }
    }

    watcher.stop().await?;
    watcher_task.abort();

    info!("Shutdown complete");
    Ok(())
}

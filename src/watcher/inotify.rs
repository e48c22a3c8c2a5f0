// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use futures_util::StreamExt;
use inotify::{EventMask, EventOwned, EventStream, WatchDescriptor, WatchMask};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::compat::{IN_CREATE, IN_DELETE, IN_MODIFY, IN_MOVED_FROM, IN_MOVED_TO, Notifier, WatchManager};
use crate::config::Config;
use crate::error::{CompatError, Result};
use crate::probe;
use crate::watcher::traits::{Watcher, WatcherEvent};

/// `struct inotify_event` header plus NAME_MAX + 1
const MIN_EVENT_BUFFER: usize = 16 + 256;

/// Watch state shared between the watcher and its pump task.
#[derive(Default)]
struct Registry {
    /// Bumped on every `watch`/`stop`, so a finished pump only tears down its own watch set
    generation: u64,
    watches: Option<WatchManager>,
    paths: HashMap<WatchDescriptor, PathBuf>,
}

impl Registry {
    fn reset(&mut self) {
        self.generation += 1;
        self.watches = None;
        self.paths.clear();
    }
}

type SharedRegistry = Arc<RwLock<Registry>>;

pub struct InotifyWatcher {
    event_buffer_size: usize,
    channel_capacity: usize,
    registry: SharedRegistry,
    task: Option<JoinHandle<()>>,
}

impl InotifyWatcher {
    pub fn new() -> Self {
        Self::with_sizes(4096, 1024)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_sizes(config.event_buffer_size, config.channel_capacity)
    }

    fn with_sizes(event_buffer_size: usize, channel_capacity: usize) -> Self {
        Self {
            event_buffer_size: event_buffer_size.max(MIN_EVENT_BUFFER),
            channel_capacity: channel_capacity.max(1),
            registry: Arc::new(RwLock::new(Registry::default())),
            task: None,
        }
    }
}

#[async_trait]
impl Watcher for InotifyWatcher {
    async fn watch(&mut self, paths: &[PathBuf], mask: WatchMask) -> Result<mpsc::Receiver<WatcherEvent>> {
        probe::init()?;

        if let Some(missing) = paths.iter().find(|path| !path.exists()) {
            return Err(CompatError::PathNotFound(missing.clone()));
        }

        self.stop().await?;

        let notifier = Notifier::init()?;
        let mut watches = notifier.watches();
        let mut table = HashMap::with_capacity(paths.len());
        for path in paths {
            let wd = watches.add(path, mask)?;
            info!(path = %path.display(), "Started watching directory");
            table.insert(wd, path.clone());
        }

        let stream = notifier.into_event_stream(vec![0u8; self.event_buffer_size])?;
        let generation = {
            let mut registry = self.registry.write().await;
            registry.reset();
            registry.watches = Some(watches);
            registry.paths = table;
            registry.generation
        };

        let (tx, rx) = mpsc::channel(self.channel_capacity);
        self.task = Some(tokio::spawn(pump(stream, Arc::clone(&self.registry), generation, tx)));

        Ok(rx)
    }

    async fn unwatch(&mut self, path: &Path) -> Result<()> {
        let mut registry = self.registry.write().await;
        let wd = registry
            .paths
            .iter()
            .find(|(_, watched)| watched.as_path() == path)
            .map(|(wd, _)| wd.clone());

        let (Some(wd), Some(watches)) = (wd, registry.watches.as_mut()) else {
            return Err(CompatError::NotWatched(path.to_path_buf()));
        };

        watches.remove(wd.clone())?;
        registry.paths.remove(&wd);
        info!(path = %path.display(), "Stopped watching directory");
        Ok(())
    }

    async fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self.registry.read().await.paths.values().cloned().collect();
        paths.sort();
        paths
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            // The event stream, and with it the inotify descriptor, is dropped with the task
            task.abort();
            self.registry.write().await.reset();
            info!("Stopped watching all directories");
        }
        Ok(())
    }
}

async fn pump(
    mut stream: EventStream<Vec<u8>>,
    registry: SharedRegistry,
    generation: u64,
    tx: mpsc::Sender<WatcherEvent>,
) {
    while let Some(item) = stream.next().await {
        match item {
            Ok(event) => {
                if !dispatch(&registry, &tx, event).await {
                    warn!("Event receiver closed, stopping watcher");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to read inotify events");
                break;
            }
        }
    }

    let mut registry = registry.write().await;
    if registry.generation == generation {
        registry.reset();
    }
    debug!("Event pump finished");
}

/// Returns false once the receiving side is gone.
async fn dispatch(registry: &SharedRegistry, tx: &mpsc::Sender<WatcherEvent>, event: EventOwned) -> bool {
    if event.mask.contains(EventMask::Q_OVERFLOW) {
        warn!("inotify event queue overflowed, events were lost");
        return true;
    }
    if event.mask.contains(EventMask::IGNORED) {
        registry.write().await.paths.remove(&event.wd);
        debug!(wd = ?event.wd, "Watch removed by kernel");
        return true;
    }

    let Some(base) = registry.read().await.paths.get(&event.wd).cloned() else {
        debug!(wd = ?event.wd, "Event for unknown watch");
        return true;
    };
    let path = match &event.name {
        Some(name) => base.join(name),
        None => base,
    };

    for watcher_event in classify(event.mask, path, event.cookie) {
        match tx.try_send(watcher_event) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                warn!(path = %dropped.path().display(), "Watcher channel full, dropping event");
            }
            Err(TrySendError::Closed(_)) => return false,
        }
    }
    true
}

/// One event per facade constant set in `mask`.
fn classify(mask: EventMask, path: PathBuf, cookie: u32) -> Vec<WatcherEvent> {
    let has = |flag: WatchMask| mask.bits() & flag.bits() != 0;
    let mut events = Vec::new();

    if has(IN_CREATE) {
        events.push(WatcherEvent::Create(path.clone()));
    }
    if has(IN_MODIFY) {
        events.push(WatcherEvent::Modify(path.clone()));
    }
    if has(IN_MOVED_FROM) {
        events.push(WatcherEvent::MovedFrom { path: path.clone(), cookie });
    }
    if has(IN_MOVED_TO) {
        events.push(WatcherEvent::MovedTo { path: path.clone(), cookie });
    }
    if has(IN_DELETE) {
        events.push(WatcherEvent::Delete(path));
    }

    events
}

impl Default for InotifyWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InotifyWatcher {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

// SPDX-License-Identifier: GPL-3.0-only
use async_trait::async_trait;
use inotify::WatchMask;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::Receiver;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatcherEvent {
    Create(PathBuf),
    Delete(PathBuf),
    Modify(PathBuf),
    /// First half of a rename; pairs with the `MovedTo` carrying the same cookie
    MovedFrom { path: PathBuf, cookie: u32 },
    MovedTo { path: PathBuf, cookie: u32 },
}

impl WatcherEvent {
    pub fn path(&self) -> &Path {
        match self {
            WatcherEvent::Create(path)
            | WatcherEvent::Delete(path)
            | WatcherEvent::Modify(path)
            | WatcherEvent::MovedFrom { path, .. }
            | WatcherEvent::MovedTo { path, .. } => path,
        }
    }
}

#[async_trait]
pub trait Watcher: Send + Sync {
    /// Start watching the given directories for the events in `mask` and
    /// return a receiver for them. Replaces any previous watch set.
    async fn watch(&mut self, paths: &[PathBuf], mask: WatchMask) -> Result<Receiver<WatcherEvent>>;

    /// Stop watching a single directory
    async fn unwatch(&mut self, path: &Path) -> Result<()>;

    /// Directories currently watched, sorted
    async fn watched_paths(&self) -> Vec<PathBuf>;

    /// Stop watching everything
    async fn stop(&mut self) -> Result<()>;
}

// SPDX-License-Identifier: GPL-3.0-only
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(thiserror::Error, Debug, Clone)]
pub enum CompatError {
    #[error("inotify is not available on this host: {0}")]
    DependencyMissing(#[source] Arc<io::Error>),

    #[error("Unknown event kind: {0}")]
    UnknownEvent(String),

    #[error("No event kinds configured")]
    NoEvents,

    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Path is not watched: {}", .0.display())]
    NotWatched(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[source] Arc<io::Error>),
}

impl From<io::Error> for CompatError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, CompatError>;

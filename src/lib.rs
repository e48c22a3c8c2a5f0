// SPDX-License-Identifier: GPL-3.0-only
//! Stable import location for the inotify constants and types the include
//! server expects, plus a small directory watcher built on top of them.

pub mod compat;
pub mod config;
pub mod error;
pub mod logging;
pub mod probe;
pub mod watcher;

#[cfg(test)]
mod test_helpers;

pub use compat::{IN_CREATE, IN_DELETE, IN_MODIFY, IN_MOVED_FROM, IN_MOVED_TO, Notifier, WatchManager};
pub use error::{CompatError, Result};
pub use probe::{init, Bindings};

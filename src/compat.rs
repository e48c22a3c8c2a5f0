// SPDX-License-Identifier: GPL-3.0-only
//! Stable names for the parts of the inotify bindings the include server uses.
//!
//! Everything here is an alias of an item owned by the `inotify` crate. The
//! module holds no state and exports exactly these seven names.

use inotify::WatchMask;

/// File or directory created in a watched directory.
pub const IN_CREATE: WatchMask = WatchMask::CREATE;

/// File or directory deleted from a watched directory.
pub const IN_DELETE: WatchMask = WatchMask::DELETE;

/// File modified.
pub const IN_MODIFY: WatchMask = WatchMask::MODIFY;

/// File moved out of a watched directory.
pub const IN_MOVED_FROM: WatchMask = WatchMask::MOVED_FROM;

/// File moved into a watched directory.
pub const IN_MOVED_TO: WatchMask = WatchMask::MOVED_TO;

/// Registers and removes watches. Obtained from a [`Notifier`].
pub use inotify::Watches as WatchManager;

/// Owns the inotify descriptor and yields queued events.
pub use inotify::Inotify as Notifier;

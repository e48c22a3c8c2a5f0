// SPDX-License-Identifier: GPL-3.0-only
use std::io;
use std::sync::{Arc, OnceLock};

use inotify::WatchMask;
use tracing::{debug, error, info};

use crate::compat::{IN_CREATE, IN_DELETE, IN_MODIFY, IN_MOVED_FROM, IN_MOVED_TO, Notifier};
use crate::error::{CompatError, Result};

static BINDINGS: OnceLock<std::result::Result<Bindings, Arc<io::Error>>> = OnceLock::new();

/// Snapshot of the facade's event constants, taken once the notification
/// facility is known to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings {
    pub create: WatchMask,
    pub delete: WatchMask,
    pub modify: WatchMask,
    pub moved_from: WatchMask,
    pub moved_to: WatchMask,
}

impl Bindings {
    fn bind() -> Self {
        Self {
            create: IN_CREATE,
            delete: IN_DELETE,
            modify: IN_MODIFY,
            moved_from: IN_MOVED_FROM,
            moved_to: IN_MOVED_TO,
        }
    }

    /// Constants by their exported name, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, WatchMask)> {
        [
            ("IN_CREATE", self.create),
            ("IN_DELETE", self.delete),
            ("IN_MODIFY", self.modify),
            ("IN_MOVED_FROM", self.moved_from),
            ("IN_MOVED_TO", self.moved_to),
        ]
        .into_iter()
    }

    /// Union of all five constants
    pub fn all(&self) -> WatchMask {
        self.iter().fold(WatchMask::empty(), |acc, (_, mask)| acc | mask)
    }
}

/// Check that inotify can be used on this host and return the bound constants.
///
/// The probe runs at most once per process; later calls return the cached
/// outcome. A failure is [`CompatError::DependencyMissing`] and is meant to be
/// treated as fatal by the caller.
pub fn init() -> Result<&'static Bindings> {
    let outcome = BINDINGS.get_or_init(|| {
        let outcome = resolve(Notifier::init);
        match &outcome {
            Ok(_) => info!("inotify available, bindings initialized"),
            Err(e) => error!(error = %e, "inotify unavailable"),
        }
        outcome
    });

    match outcome {
        Ok(bindings) => Ok(bindings),
        Err(e) => Err(CompatError::DependencyMissing(Arc::clone(e))),
    }
}

/// Whether [`init`] has already run in this process
pub fn is_initialized() -> bool {
    BINDINGS.get().is_some()
}

fn resolve<F>(probe: F) -> std::result::Result<Bindings, Arc<io::Error>>
where
    F: FnOnce() -> io::Result<Notifier>,
{
    let notifier = probe().map_err(Arc::new)?;
    if let Err(e) = notifier.close() {
        debug!(error = %e, "Failed to close probe descriptor");
    }
    Ok(Bindings::bind())
}

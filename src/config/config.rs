// SPDX-License-Identifier: GPL-3.0-only
use inotify::WatchMask;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compat::{IN_CREATE, IN_DELETE, IN_MODIFY, IN_MOVED_FROM, IN_MOVED_TO};
use crate::error::CompatError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories to watch
    pub watch_paths: Vec<PathBuf>,

    /// Event kinds to subscribe to (create, delete, modify, moved_from, moved_to)
    pub events: Vec<String>,

    /// Size in bytes of the buffer used to read events from the kernel
    pub event_buffer_size: usize,

    /// Capacity of the channel between the watcher task and its consumer
    pub channel_capacity: usize,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from TOML file with environment variable overrides
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var("PUMP_INOTIFY_CONFIG")
            .unwrap_or_else(|_| "config.toml".to_string());

        let mut config: Config = if std::path::Path::new(&config_path).exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents)?
        } else {
            Config::default()
        };

        if let Some(val) = std::env::var_os("PUMP_INOTIFY_WATCH_PATHS") {
            config.watch_paths = std::env::split_paths(&val).collect();
        }
        if let Ok(val) = std::env::var("PUMP_INOTIFY_EVENTS") {
            config.events = val
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Ok(val) = std::env::var("PUMP_INOTIFY_EVENT_BUFFER_SIZE") {
            config.event_buffer_size = val.parse()?;
        }
        if let Ok(val) = std::env::var("PUMP_INOTIFY_CHANNEL_CAPACITY") {
            config.channel_capacity = val.parse()?;
        }
        if let Ok(val) = std::env::var("PUMP_INOTIFY_LOG_LEVEL") {
            config.log_level = val;
        }

        Ok(config)
    }

    /// Combine the configured event kinds into one watch mask
    pub fn watch_mask(&self) -> Result<WatchMask, CompatError> {
        if self.events.is_empty() {
            return Err(CompatError::NoEvents);
        }

        self.events
            .iter()
            .try_fold(WatchMask::empty(), |acc, name| -> Result<WatchMask, CompatError> {
                Ok(acc | parse_event(name)?)
            })
    }
}

/// Accepts `create` as well as `IN_CREATE`, case-insensitively.
fn parse_event(name: &str) -> Result<WatchMask, CompatError> {
    let lower = name.trim().to_ascii_lowercase();
    let short = lower.strip_prefix("in_").unwrap_or(&lower);
    match short {
        "create" => Ok(IN_CREATE),
        "delete" => Ok(IN_DELETE),
        "modify" => Ok(IN_MODIFY),
        "moved_from" => Ok(IN_MOVED_FROM),
        "moved_to" => Ok(IN_MOVED_TO),
        _ => Err(CompatError::UnknownEvent(name.to_string())),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            watch_paths: vec![PathBuf::from(".")],
            events: ["create", "delete", "modify", "moved_from", "moved_to"]
                .into_iter()
                .map(String::from)
                .collect(),
            event_buffer_size: 4096,
            channel_capacity: 1024,
            log_level: String::from("info"),
        }
    }
}

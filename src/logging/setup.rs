// SPDX-License-Identifier: GPL-3.0-only
use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber; `RUST_LOG` takes precedence over `log_level`
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = build_filter(log_level);
    let effective = filter.to_string();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
        )
        .try_init()
        .with_context(|| format!("Failed to install log subscriber with filter '{}'", effective))?;

    tracing::debug!(filter = %effective, "Logging initialized");
    Ok(())
}

/// An unparsable level falls back to `info` instead of failing startup
fn build_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_setup_reports_filter() {
        // The global subscriber can only be installed once per process
        let _ = setup_logging("debug");
        let err = setup_logging("debug").unwrap_err();
        assert!(err.to_string().starts_with("Failed to install log subscriber with filter"));
    }

    #[test]
    fn test_filter_keeps_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(
            build_filter("pump_inotify=trace").to_string(),
            EnvFilter::new("pump_inotify=trace").to_string()
        );
    }

    #[test]
    fn test_invalid_level_falls_back_to_info() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(
            build_filter("pump_inotify=loud").to_string(),
            EnvFilter::new("info").to_string()
        );
    }
}

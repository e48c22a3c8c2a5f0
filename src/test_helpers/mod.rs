// SPDX-License-Identifier: GPL-3.0-only
use std::path::Path;
use crate::config::Config;

/// Create a test configuration watching `dir`
pub fn create_test_config(dir: &Path) -> Config {
    Config {
        watch_paths: vec![dir.to_path_buf()],
        event_buffer_size: 4096,
        channel_capacity: 64,
        log_level: "error".to_string(), // Reduce log noise in tests
        ..Config::default()
    }
}

/// Create a temporary directory for tests
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::TempDir::new().expect("Failed to create temp directory")
}

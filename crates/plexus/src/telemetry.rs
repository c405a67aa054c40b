//! Log file setup.
//!
//! The terminal belongs to the UI, so logs go to `plexus.log` in the data
//! directory. `PLEXUS_LOG` takes a tracing filter, `info` by default.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Without a writable log file this is a no-op.
pub fn init() {
    let Some(path) = plexus_config::log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        if fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = std::env::var("PLEXUS_LOG").unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

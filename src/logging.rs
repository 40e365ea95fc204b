//! Logger setup.
//!
//! The terminal belongs to the TUI, so log lines go to a file. `RUST_LOG`
//! overrides the configured level.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;

use env_logger::Target;

use crate::config::{LoggingSettings, default_log_path};

#[cfg(test)]
mod tests;

/// Install the global logger. Returns the file logs are written to, if any.
pub fn init(settings: &LoggingSettings) -> Option<PathBuf> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&settings.level));
    builder
        .filter_module("zbus", log::LevelFilter::Warn)
        .filter_module("symphonia", log::LevelFilter::Warn);

    let path = settings.file.clone().or_else(default_log_path);
    let (log_target, target) = open_target(path);
    builder.target(log_target);

    if builder.try_init().is_err() {
        return None;
    }
    log::info!(
        "[Main] starting onair v{} (log: {})",
        env!("CARGO_PKG_VERSION"),
        target
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "discarded".to_string())
    );
    target
}

/// Where log lines go. Without a writable file they are dropped: stderr
/// would draw over the TUI.
fn open_target(path: Option<PathBuf>) -> (Target, Option<PathBuf>) {
    let file = path.as_ref().and_then(|p| {
        if let Some(dir) = p.parent() {
            let _ = fs::create_dir_all(dir);
        }
        OpenOptions::new().create(true).append(true).open(p).ok()
    });
    match file {
        Some(f) => (Target::Pipe(Box::new(f)), path),
        None => (Target::Pipe(Box::new(io::sink())), None),
    }
}

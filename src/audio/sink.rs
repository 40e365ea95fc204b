//! Utilities for turning a source locator into a `rodio` sink.
//!
//! The helpers here resolve a locator to a local file, then open/decode it
//! into a paused `Sink` ready for the device thread.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::device::DeviceError;

/// Resolve a source locator to a local path.
///
/// `file://` prefixes are stripped and relative paths are joined to
/// `media_dir`. Remote locators are refused: there is no streaming client.
pub(crate) fn resolve_source(locator: &str, media_dir: Option<&Path>) -> Result<PathBuf, DeviceError> {
    let locator = locator.trim();
    if locator.is_empty() {
        return Err(DeviceError::NoSource);
    }

    if let Some(path) = locator.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }

    if let Some((scheme, _)) = locator.split_once("://") {
        return Err(DeviceError::UnsupportedScheme(scheme.to_ascii_lowercase()));
    }

    let path = PathBuf::from(locator);
    match media_dir {
        Some(dir) if path.is_relative() => Ok(dir.join(path)),
        _ => Ok(path),
    }
}

/// Create a paused `Sink` for `path` at `volume`, plus the decoder's total
/// duration when the container reports one.
pub(super) fn create_sink(
    handle: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<(Sink, Option<Duration>), DeviceError> {
    let file = File::open(path).map_err(|source| DeviceError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| DeviceError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let total = source.total_duration();

    let sink = Sink::connect_new(handle.mixer());
    sink.pause();
    sink.set_volume(volume);
    sink.append(source);
    Ok((sink, total))
}

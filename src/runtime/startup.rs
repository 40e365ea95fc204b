use std::sync::mpsc;

use crate::audio::{PlaybackController, PlaybackDiagnostic, ThreadedDevice};
use crate::config;
use crate::content::{ContentStore, placeholder_track};

/// Open the content store. A store that cannot be read is replaced by an
/// in-memory one so the session still works.
pub fn open_store(settings: &config::ContentSettings) -> ContentStore {
    let Some(path) = settings.store_path.clone().or_else(config::default_store_path) else {
        log::warn!("[Store] no data directory, content will not persist");
        return ContentStore::in_memory();
    };
    match ContentStore::open(path.clone()) {
        Ok(store) => {
            log::info!("[Store] using {}", path.display());
            store
        }
        Err(e) => {
            log::warn!("[Store] {e}; content will not persist this session");
            ContentStore::in_memory()
        }
    }
}

/// Spawn the output device and wrap it in the controller, with the startup
/// placeholder loaded and diagnostics wired.
pub fn build_player(
    settings: &config::Settings,
) -> (
    PlaybackController<ThreadedDevice>,
    mpsc::Receiver<PlaybackDiagnostic>,
) {
    let device = ThreadedDevice::spawn(settings.audio.clone(), settings.playback.media_dir.clone());
    let mut player = PlaybackController::new(
        device,
        settings.audio.initial_volume,
        settings.playback.default_source.clone(),
    );

    let (diag_tx, diag_rx) = mpsc::channel();
    player.set_diagnostics(diag_tx);

    if let Some(track) = placeholder_track(&settings.playback) {
        log::debug!("[Main] placeholder: {} by {}", track.title, track.artist);
        player.load_placeholder(track);
    }
    (player, diag_rx)
}

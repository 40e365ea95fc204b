//! MPRIS D-Bus surface so media keys and `playerctl` can drive playback.
//!
//! Incoming calls become `ControlCmd`s on a channel the event loop drains;
//! outgoing properties are read from a snapshot the runtime keeps current.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{OwnedObjectPath, OwnedValue, Value};

use crate::audio::{PlaybackState, TransportState};

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.onair";
const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

#[derive(Clone, Debug, PartialEq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
}

#[derive(Debug, Default)]
struct SharedState {
    transport: TransportState,
    volume: f64,
    title: Option<String>,
    artist: Vec<String>,
    url: Option<String>,
    art_url: Option<String>,
    length_micros: Option<i64>,
    track_id: Option<OwnedObjectPath>,
}

/// Object path for a track id. Characters D-Bus paths do not allow become `_`.
fn track_object_path(id: &str) -> Option<OwnedObjectPath> {
    let element: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if element.is_empty() {
        return None;
    }
    OwnedObjectPath::try_from(format!("{OBJECT_PATH}/track/{element}")).ok()
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    /// Mirror a controller snapshot into the exported properties.
    pub fn set_snapshot(&self, snapshot: &PlaybackState) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.transport = snapshot.transport;
        s.volume = f64::from(snapshot.volume);

        let Some(track) = &snapshot.current else {
            s.title = None;
            s.artist.clear();
            s.url = None;
            s.art_url = None;
            s.length_micros = None;
            s.track_id = None;
            return;
        };

        s.title = Some(track.title.clone());
        s.artist = vec![track.artist.clone()];
        s.url = track.audio_source.clone();
        s.art_url = (!track.cover_url.is_empty()).then(|| track.cover_url.clone());
        s.length_micros = (snapshot.duration_known && !snapshot.is_live)
            .then(|| (snapshot.duration_seconds * 1_000_000.0) as i64);
        s.track_id = track_object_path(&track.id);
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "onair"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn insert_value<'a>(map: &mut HashMap<String, OwnedValue>, key: &str, value: impl Into<Value<'a>>) {
    if let Ok(v) = OwnedValue::try_from(value.into()) {
        map.insert(key.to_string(), v);
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {}

    fn previous(&self) {}

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.transport {
            TransportState::Stopped => "Stopped",
            TransportState::Playing | TransportState::Buffering => "Playing",
            TransportState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(0.0)
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        match &s.track_id {
            Some(path) => insert_value(&mut map, "mpris:trackid", path.clone().into_inner()),
            None => {
                if let Ok(path) = OwnedObjectPath::try_from(NO_TRACK) {
                    insert_value(&mut map, "mpris:trackid", path.into_inner());
                }
            }
        }
        if let Some(title) = &s.title {
            insert_value(&mut map, "xesam:title", title.clone());
        }
        if !s.artist.is_empty() {
            insert_value(&mut map, "xesam:artist", s.artist.clone());
        }
        if let Some(url) = &s.url {
            insert_value(&mut map, "xesam:url", url.clone());
        }
        if let Some(art) = &s.art_url {
            insert_value(&mut map, "mpris:artUrl", art.clone());
        }
        if let Some(len) = s.length_micros {
            insert_value(&mut map, "mpris:length", len);
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("[MPRIS] failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection.request_name(BUS_NAME).await {
                log::warn!("[MPRIS] failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                log::warn!("[MPRIS] failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                log::warn!("[MPRIS] failed to register player iface: {e}");
                return;
            }
            log::info!("[MPRIS] registered as {BUS_NAME}");

            // Keep the service alive.
            loop {
                Timer::after(std::time::Duration::from_secs(3600)).await;
            }
        });
    });

    MprisHandle { state }
}

#[cfg(test)]
mod tests;

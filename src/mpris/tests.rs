use super::*;
use crate::audio::Track;
use std::sync::mpsc;

fn snapshot() -> PlaybackState {
    PlaybackState {
        current: Some(
            Track::new("c-1", "Seven", "Jungkook")
                .with_source("sample-1.mp3")
                .with_cover("https://picsum.photos/id/1/300/300"),
        ),
        transport: TransportState::Playing,
        volume: 0.5,
        position_seconds: 3.0,
        duration_seconds: 1.5,
        duration_known: true,
        is_live: false,
    }
}

fn iface(state: &Arc<Mutex<SharedState>>) -> PlayerIface {
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    PlayerIface {
        tx,
        state: state.clone(),
    }
}

#[test]
fn track_paths_are_sanitized() {
    assert_eq!(
        track_object_path("hero-audio-stream").unwrap().as_str(),
        "/org/mpris/MediaPlayer2/track/hero_audio_stream"
    );
    assert_eq!(
        track_object_path("u.1@x").unwrap().as_str(),
        "/org/mpris/MediaPlayer2/track/u_1_x"
    );
    assert!(track_object_path("").is_none());
}

#[test]
fn set_snapshot_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_snapshot(&snapshot());
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Seven"));
        assert_eq!(s.artist, vec!["Jungkook".to_string()]);
        assert_eq!(s.url.as_deref(), Some("sample-1.mp3"));
        assert_eq!(s.length_micros, Some(1_500_000));
        assert_eq!(s.volume, 0.5);
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/c_1")
        );
    }

    handle.set_snapshot(&PlaybackState::default());
    {
        let s = state.lock().unwrap();
        assert_eq!(s.transport, TransportState::Stopped);
        assert_eq!(s.title, None);
        assert!(s.artist.is_empty());
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn live_tracks_have_no_length() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    let mut live = snapshot();
    live.is_live = true;
    handle.set_snapshot(&live);
    assert_eq!(state.lock().unwrap().length_micros, None);
}

#[test]
fn playback_status_maps_transport() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let iface = iface(&state);

    assert_eq!(iface.playback_status(), "Stopped");
    for (transport, expected) in [
        (TransportState::Playing, "Playing"),
        (TransportState::Paused, "Paused"),
        (TransportState::Buffering, "Playing"),
    ] {
        state.lock().unwrap().transport = transport;
        assert_eq!(iface.playback_status(), expected);
    }
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };
    handle.set_snapshot(&snapshot());

    let map = iface(&state).metadata();
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:url",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_without_track_reports_no_track() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let map = iface(&state).metadata();
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("mpris:trackid"));
}

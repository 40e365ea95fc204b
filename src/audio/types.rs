//! Audio-related value types shared by the controller, the device and the UI.
//!
//! This module defines the `Track` value handed to the controller, the
//! transport state machine, the playback snapshot, and the ticket/event
//! types exchanged with the output device.

/// One playable item, built by a UI surface from content metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Session-unique identity; the only key used to decide "same track".
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Display only.
    pub cover_url: String,
    /// Locator of the audio resource. `None` means display-only.
    pub audio_source: Option<String>,
    /// True for unbounded/live streams that cannot be seeked.
    pub is_live_marker: bool,
}

impl Track {
    pub fn new(id: impl Into<String>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            cover_url: String::new(),
            audio_source: None,
            is_live_marker: false,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.audio_source = Some(source.into());
        self
    }

    pub fn with_cover(mut self, cover_url: impl Into<String>) -> Self {
        self.cover_url = cover_url.into();
        self
    }

    pub fn live(mut self) -> Self {
        self.is_live_marker = true;
        self
    }
}

/// Transport state of the controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportState {
    /// Nothing has ever been loaded.
    Stopped,
    Playing,
    Paused,
    /// Reserved; the controller never enters it.
    Buffering,
}

impl Default for TransportState {
    fn default() -> Self {
        Self::Stopped
    }
}

impl TransportState {
    pub fn is_playing(self) -> bool {
        self == Self::Playing
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stopped => "Stopped",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Buffering => "Buffering",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Snapshot of everything the UI needs to render playback.
pub struct PlaybackState {
    /// Currently loaded track, if any.
    pub current: Option<Track>,
    pub transport: TransportState,
    /// Output volume in `[0, 1]`; survives track changes.
    pub volume: f32,
    /// Seconds into the current track. Meaningless while `is_live`.
    pub position_seconds: f64,
    /// Total length in seconds, `0.0` until the device reports it.
    pub duration_seconds: f64,
    /// Whether the device has reported a duration for the current load.
    pub duration_known: bool,
    /// Mirror of `current.is_live_marker`.
    pub is_live: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current: None,
            transport: TransportState::Stopped,
            volume: 1.0,
            position_seconds: 0.0,
            duration_seconds: 0.0,
            duration_known: false,
            is_live: false,
        }
    }
}

impl PlaybackState {
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.id.as_str())
    }

    /// Whether `track_id` is the loaded track and is currently playing.
    pub fn is_playing_track(&self, track_id: &str) -> bool {
        self.transport.is_playing() && self.current_id() == Some(track_id)
    }

    /// Playback progress in `[0, 1]`; live tracks always report full.
    pub fn progress(&self) -> f64 {
        if self.is_live {
            return 1.0;
        }
        if !self.duration_known || self.duration_seconds <= 0.0 {
            return 0.0;
        }
        (self.position_seconds / self.duration_seconds).clamp(0.0, 1.0)
    }
}

/// Identity attached to every device request and echoed back on device events.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ticket {
    pub track_id: String,
    /// Incremented on every track load.
    pub load: u64,
    /// Incremented on every device-start request.
    pub start: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEventKind {
    /// `timeupdate`: current playback position in seconds.
    TimeProgress(f64),
    /// `loadedmetadata`: total duration in seconds.
    DurationKnown(f64),
    /// End of a finite source.
    Ended,
    /// The device refused or failed to begin playback.
    StartFailed(String),
}

impl DeviceEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TimeProgress(_) => "time-progress",
            Self::DurationKnown(_) => "duration-known",
            Self::Ended => "ended",
            Self::StartFailed(_) => "start-failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeviceEvent {
    pub ticket: Ticket,
    pub kind: DeviceEventKind,
}

impl DeviceEvent {
    pub fn new(ticket: Ticket, kind: DeviceEventKind) -> Self {
        Self { ticket, kind }
    }
}

/// Recoverable conditions the controller absorbs instead of returning errors.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackDiagnostic {
    /// The device could not begin playback; transport rolled back to `Paused`.
    StartFailure { track_id: String, reason: String },
    /// A seek outside the playable range, or any seek on a live track.
    /// `applied` is the clamped position, or `None` when the seek was ignored.
    InvalidSeek { requested: f64, applied: Option<f64> },
    /// A device event tagged with a load or start that is no longer current.
    StaleEvent { track_id: String, event: &'static str },
}

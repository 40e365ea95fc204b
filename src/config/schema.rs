use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/onair/config.toml` or `~/.config/onair/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `ONAIR__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub content: ContentSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied before anything plays, in `[0, 1]`.
    pub initial_volume: f32,
    /// Amount `+` / `-` change the volume by.
    pub volume_step: f32,
    /// How often the device thread reports progress (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.8,
            volume_step: 0.05,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Source used for tracks that carry no audio locator of their own.
    pub default_source: String,
    /// Directory relative sources are resolved against.
    pub media_dir: Option<PathBuf>,
    /// Whether a now-playing placeholder is loaded (paused) at startup.
    pub placeholder: bool,
    pub placeholder_id: String,
    pub placeholder_title: String,
    pub placeholder_artist: String,
    pub placeholder_live: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            default_source: "sample-1.mp3".to_string(),
            media_dir: None,
            placeholder: true,
            placeholder_id: "np-1".to_string(),
            placeholder_title: "As It Was".to_string(),
            placeholder_artist: "Harry Styles".to_string(),
            placeholder_live: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { scrub_seconds: 5 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Which time fields to show in the player bar, and in what order.
    ///
    /// Example: ["elapsed", "total", "remaining"]
    pub now_playing_time_fields: Vec<TimeField>,

    /// Separator used to join `now_playing_time_fields`.
    pub now_playing_time_separator: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ onair: hit music, all day ~ ".to_string(),
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Total, TimeField::Remaining],
            now_playing_time_separator: " / ".to_string(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeField {
    Elapsed,
    Total,
    Remaining,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
    /// JSON file holding all site content. `None` uses the XDG data dir.
    pub store_path: Option<PathBuf>,
    /// Whether simulated listeners post into the chat.
    pub chatter: bool,
    pub chatter_interval_ms: u64,
    /// Probability in `[0, 1]` that a chatter tick posts a message.
    pub chatter_chance: f64,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            store_path: None,
            chatter: true,
            chatter_interval_ms: 8000,
            chatter_chance: 0.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is not set (e.g. "info", "onair=debug").
    pub level: String,
    /// Log file. `None` uses `$XDG_STATE_HOME/onair/onair.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

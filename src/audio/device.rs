use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::AudioSettings;

use super::thread::spawn_device_thread;
use super::types::{DeviceEvent, DeviceEventKind, Ticket};

/// The primitives any audio output exposes. The controller is the only caller.
///
/// `play` is fire-and-observe: success is silent, failure arrives later as a
/// `StartFailed` event carrying the same ticket.
pub trait OutputDevice {
    fn load(&mut self, ticket: &Ticket, source: &str);
    fn play(&mut self, ticket: &Ticket);
    fn pause(&mut self);
    fn set_current_time(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);
    /// Next pending device event, if any. Never blocks.
    fn poll_event(&mut self) -> Option<DeviceEvent>;
    fn shutdown(&mut self) {}
}

#[derive(Debug, thiserror::Error)]
pub enum DeviceError {
    #[error("no audio source")]
    NoSource,
    #[error("unsupported source scheme: {0}")]
    UnsupportedScheme(String),
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("no audio output device: {0}")]
    NoOutput(String),
}

#[derive(Debug)]
pub enum DeviceCmd {
    /// Replace the loaded source; the sink starts paused.
    Load { ticket: Ticket, source: String },
    /// Begin or resume playback of the loaded source.
    Play { ticket: Ticket },
    Pause,
    Seek(f64),
    SetVolume(f32),
    /// Stop output and end the device thread.
    Shutdown,
}

/// Production device: forwards commands to a dedicated thread that owns the
/// rodio output stream, and collects the events it reports.
pub struct ThreadedDevice {
    tx: Sender<DeviceCmd>,
    events: Receiver<DeviceEvent>,
    local: VecDeque<DeviceEvent>,
    join: Option<JoinHandle<()>>,
}

impl ThreadedDevice {
    pub fn spawn(audio_settings: AudioSettings, media_dir: Option<PathBuf>) -> Self {
        let (tx, rx) = mpsc::channel::<DeviceCmd>();
        let (event_tx, event_rx) = mpsc::channel::<DeviceEvent>();

        let join = spawn_device_thread(rx, event_tx, audio_settings, media_dir);

        Self {
            tx,
            events: event_rx,
            local: VecDeque::new(),
            join: Some(join),
        }
    }

    fn send(&self, cmd: DeviceCmd) -> Result<(), mpsc::SendError<DeviceCmd>> {
        self.tx.send(cmd)
    }
}

impl OutputDevice for ThreadedDevice {
    fn load(&mut self, ticket: &Ticket, source: &str) {
        if self
            .send(DeviceCmd::Load {
                ticket: ticket.clone(),
                source: source.to_string(),
            })
            .is_err()
        {
            log::warn!("[Device] load dropped, device thread is gone");
        }
    }

    fn play(&mut self, ticket: &Ticket) {
        if self
            .send(DeviceCmd::Play {
                ticket: ticket.clone(),
            })
            .is_err()
        {
            // Nobody will answer this start; report the failure ourselves.
            self.local.push_back(DeviceEvent::new(
                ticket.clone(),
                DeviceEventKind::StartFailed("device thread is not running".to_string()),
            ));
        }
    }

    fn pause(&mut self) {
        let _ = self.send(DeviceCmd::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        let _ = self.send(DeviceCmd::Seek(seconds));
    }

    fn set_volume(&mut self, volume: f32) {
        let _ = self.send(DeviceCmd::SetVolume(volume));
    }

    fn poll_event(&mut self) -> Option<DeviceEvent> {
        if let Some(ev) = self.local.pop_front() {
            return Some(ev);
        }
        self.events.try_recv().ok()
    }

    fn shutdown(&mut self) {
        let _ = self.send(DeviceCmd::Shutdown);
        if let Some(h) = self.join.take() {
            let _ = h.join();
        }
    }
}

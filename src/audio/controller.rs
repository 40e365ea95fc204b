//! The single authority over the output device.
//!
//! Every UI surface goes through `PlaybackController`; nothing else talks to
//! the device. Commands update `PlaybackState` optimistically and the device's
//! asynchronous events are reconciled back in through `handle_event`, guarded
//! by the ticket each request was issued with.

use std::sync::mpsc::{self, Receiver, Sender};

use super::device::OutputDevice;
use super::types::{
    DeviceEvent, DeviceEventKind, PlaybackDiagnostic, PlaybackState, Ticket, Track,
    TransportState,
};

/// What `play(track)` resolves to for a given track.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayIntent {
    /// `track` is already loaded: flip play/pause.
    Toggle,
    /// Load `track`, replacing whatever is current, and start it.
    Switch,
}

pub struct PlaybackController<D: OutputDevice> {
    device: D,
    state: PlaybackState,
    default_source: String,
    ticket: Ticket,
    subscribers: Vec<Sender<PlaybackState>>,
    diagnostics: Option<Sender<PlaybackDiagnostic>>,
}

impl<D: OutputDevice> PlaybackController<D> {
    /// Create a controller in `Stopped` with nothing loaded.
    ///
    /// `default_source` is used for tracks that carry no `audio_source`.
    pub fn new(mut device: D, initial_volume: f32, default_source: impl Into<String>) -> Self {
        let volume = clamp_volume(initial_volume).unwrap_or(1.0);
        device.set_volume(volume);

        Self {
            device,
            state: PlaybackState {
                volume,
                ..PlaybackState::default()
            },
            default_source: default_source.into(),
            ticket: Ticket::default(),
            subscribers: Vec::new(),
            diagnostics: None,
        }
    }

    /// Load a placeholder track without starting it; transport becomes `Paused`.
    pub fn load_placeholder(&mut self, track: Track) {
        self.load(track);
        self.state.transport = TransportState::Paused;
        self.notify();
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    /// Receive a snapshot after every change to the playback state.
    pub fn subscribe(&mut self) -> Receiver<PlaybackState> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(self.state.clone());
        self.subscribers.push(tx);
        rx
    }

    /// Route recoverable failures to `tx` in addition to the log.
    pub fn set_diagnostics(&mut self, tx: Sender<PlaybackDiagnostic>) {
        self.diagnostics = Some(tx);
    }

    pub fn play_intent(&self, track: &Track) -> PlayIntent {
        if self.state.current_id() == Some(track.id.as_str()) {
            PlayIntent::Toggle
        } else {
            PlayIntent::Switch
        }
    }

    /// Play `track`, or toggle it when it is already the loaded track.
    pub fn play(&mut self, track: Track) {
        match self.play_intent(&track) {
            PlayIntent::Toggle => self.toggle(),
            PlayIntent::Switch => self.switch_to(track),
        }
    }

    /// Replace the current track with `track` and start it from the beginning.
    pub fn switch_to(&mut self, track: Track) {
        log::info!("[Controller] switching to {:?} ({})", track.title, track.id);
        self.load(track);
        self.start();
        self.notify();
    }

    /// Flip between `Playing` and `Paused` without reloading.
    pub fn toggle(&mut self) {
        if self.state.current.is_none() {
            log::debug!("[Controller] toggle ignored, nothing loaded");
            return;
        }

        match self.state.transport {
            TransportState::Playing => {
                self.device.pause();
                self.state.transport = TransportState::Paused;
            }
            TransportState::Stopped | TransportState::Paused | TransportState::Buffering => {
                self.start();
            }
        }
        self.notify();
    }

    /// Move to `seconds` within the current finite track, clamped to its length.
    pub fn seek(&mut self, seconds: f64) {
        if self.state.current.is_none() {
            return;
        }
        if self.state.is_live || !seconds.is_finite() {
            self.diagnose(PlaybackDiagnostic::InvalidSeek {
                requested: seconds,
                applied: None,
            });
            return;
        }

        let upper = if self.state.duration_known {
            self.state.duration_seconds
        } else {
            f64::INFINITY
        };
        let target = seconds.clamp(0.0, upper);
        if target != seconds {
            self.diagnose(PlaybackDiagnostic::InvalidSeek {
                requested: seconds,
                applied: Some(target),
            });
        }

        self.device.set_current_time(target);
        self.state.position_seconds = target;
        self.notify();
    }

    /// Seek relative to the current position.
    pub fn seek_by(&mut self, delta_seconds: f64) {
        let target = self.state.position_seconds + delta_seconds;
        self.seek(target);
    }

    pub fn set_volume(&mut self, volume: f32) {
        let Some(volume) = clamp_volume(volume) else {
            log::debug!("[Controller] ignoring non-numeric volume");
            return;
        };
        self.device.set_volume(volume);
        self.state.volume = volume;
        self.notify();
    }

    /// Drain every pending device event into the state. Returns how many were seen.
    pub fn pump(&mut self) -> usize {
        let mut seen = 0;
        while let Some(ev) = self.device.poll_event() {
            self.handle_event(ev);
            seen += 1;
        }
        seen
    }

    /// Reconcile one device event. Events for a superseded load are dropped,
    /// and so are `Ended`/`StartFailed` from a superseded start.
    pub fn handle_event(&mut self, event: DeviceEvent) {
        let DeviceEvent { ticket, kind } = event;

        let current_load = ticket.load == self.ticket.load
            && self.state.current_id() == Some(ticket.track_id.as_str());
        let current_start = current_load && ticket.start == self.ticket.start;
        let applies = match kind {
            DeviceEventKind::StartFailed(_) | DeviceEventKind::Ended => current_start,
            DeviceEventKind::TimeProgress(_) | DeviceEventKind::DurationKnown(_) => current_load,
        };
        if !applies {
            log::debug!(
                "[Controller] dropping stale {} for {} (load {}, start {})",
                kind.name(),
                ticket.track_id,
                ticket.load,
                ticket.start
            );
            self.diagnose(PlaybackDiagnostic::StaleEvent {
                track_id: ticket.track_id,
                event: kind.name(),
            });
            return;
        }

        match kind {
            DeviceEventKind::TimeProgress(t) => {
                if self.state.is_live || !t.is_finite() {
                    return;
                }
                let mut t = t.max(0.0);
                if self.state.duration_known {
                    t = t.min(self.state.duration_seconds);
                }
                self.state.position_seconds = t;
            }
            DeviceEventKind::DurationKnown(d) => {
                if !d.is_finite() || d < 0.0 {
                    return;
                }
                self.state.duration_seconds = d;
                self.state.duration_known = true;
            }
            DeviceEventKind::Ended => {
                // Position stays at the last reported value.
                self.state.transport = TransportState::Paused;
            }
            DeviceEventKind::StartFailed(reason) => {
                log::warn!(
                    "[Controller] playback of {} failed to start: {reason}",
                    ticket.track_id
                );
                self.state.transport = TransportState::Paused;
                self.diagnose(PlaybackDiagnostic::StartFailure {
                    track_id: ticket.track_id,
                    reason,
                });
            }
        }
        self.notify();
    }

    pub fn shutdown(mut self) {
        self.device.shutdown();
    }

    #[cfg(test)]
    pub fn device(&self) -> &D {
        &self.device
    }

    fn load(&mut self, track: Track) {
        self.ticket = Ticket {
            track_id: track.id.clone(),
            load: self.ticket.load + 1,
            start: self.ticket.start,
        };

        let source = track
            .audio_source
            .clone()
            .unwrap_or_else(|| self.default_source.clone());
        self.device.load(&self.ticket, &source);

        self.state.is_live = track.is_live_marker;
        self.state.position_seconds = 0.0;
        self.state.duration_seconds = 0.0;
        self.state.duration_known = false;
        self.state.current = Some(track);
    }

    fn start(&mut self) {
        self.ticket.start += 1;
        self.state.transport = TransportState::Playing;
        self.device.play(&self.ticket);
    }

    fn notify(&mut self) {
        let snapshot = &self.state;
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    fn diagnose(&self, diagnostic: PlaybackDiagnostic) {
        if let Some(tx) = &self.diagnostics {
            let _ = tx.send(diagnostic);
        }
    }
}

fn clamp_volume(volume: f32) -> Option<f32> {
    if volume.is_nan() {
        None
    } else {
        Some(volume.clamp(0.0, 1.0))
    }
}

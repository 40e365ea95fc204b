use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use crate::config::AudioSettings;

use super::device::{DeviceCmd, DeviceError};
use super::sink::{create_sink, resolve_source};
use super::types::{DeviceEvent, DeviceEventKind, Ticket};

/// What the device currently holds for the last `Load`.
enum Loaded {
    Ready {
        ticket: Ticket,
        path: PathBuf,
        sink: Sink,
        playing: bool,
    },
    Failed {
        ticket: Ticket,
        reason: String,
    },
}

impl Loaded {
    fn ticket(&self) -> &Ticket {
        match self {
            Loaded::Ready { ticket, .. } | Loaded::Failed { ticket, .. } => ticket,
        }
    }
}

pub(super) fn spawn_device_thread(
    rx: Receiver<DeviceCmd>,
    events: Sender<DeviceEvent>,
    audio_settings: AudioSettings,
    media_dir: Option<PathBuf>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                log::error!("[Device] no audio output device: {e}");
                None
            }
        };

        let tick = Duration::from_millis(audio_settings.tick_ms.max(10));
        let mut volume = audio_settings.initial_volume.clamp(0.0, 1.0);
        let mut loaded: Option<Loaded> = None;

        let emit = |ticket: &Ticket, kind: DeviceEventKind| {
            let _ = events.send(DeviceEvent::new(ticket.clone(), kind));
        };

        fn do_load(
            stream: Option<&OutputStream>,
            ticket: Ticket,
            source: &str,
            media_dir: Option<&Path>,
            volume: f32,
        ) -> (Loaded, Option<Duration>) {
            let result = resolve_source(source, media_dir).and_then(|path| {
                let Some(stream) = stream else {
                    return Err(DeviceError::NoOutput(
                        "default output stream unavailable".to_string(),
                    ));
                };
                create_sink(stream, &path, volume).map(|(sink, total)| (path, sink, total))
            });

            match result {
                Ok((path, sink, total)) => (
                    Loaded::Ready {
                        ticket,
                        path,
                        sink,
                        playing: false,
                    },
                    total,
                ),
                Err(e) => {
                    log::warn!("[Device] load of {source:?} failed: {e}");
                    (
                        Loaded::Failed {
                            ticket,
                            reason: e.to_string(),
                        },
                        None,
                    )
                }
            }
        }

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    DeviceCmd::Load { ticket, source } => {
                        if let Some(Loaded::Ready { sink, .. }) = loaded.take() {
                            sink.stop();
                        }
                        let (next, total) = do_load(
                            stream.as_ref(),
                            ticket.clone(),
                            &source,
                            media_dir.as_deref(),
                            volume,
                        );
                        if let Some(total) = total {
                            emit(&ticket, DeviceEventKind::DurationKnown(total.as_secs_f64()));
                        }
                        loaded = Some(next);
                    }

                    DeviceCmd::Play { ticket } => {
                        let same_load = loaded
                            .as_ref()
                            .map(|l| l.ticket().load == ticket.load)
                            .unwrap_or(false);
                        if !same_load {
                            emit(
                                &ticket,
                                DeviceEventKind::StartFailed("no source loaded".to_string()),
                            );
                            continue;
                        }

                        // A drained sink cannot be resumed; rebuild it from the start.
                        let needs_rebuild = matches!(
                            loaded,
                            Some(Loaded::Ready { ref sink, .. }) if sink.empty()
                        );
                        if needs_rebuild {
                            if let Some(Loaded::Ready { path, .. }) = loaded.take() {
                                let source = path.to_string_lossy().into_owned();
                                let (next, _) = do_load(
                                    stream.as_ref(),
                                    ticket.clone(),
                                    &source,
                                    None,
                                    volume,
                                );
                                loaded = Some(next);
                            }
                        }

                        match loaded.as_mut() {
                            Some(Loaded::Ready {
                                ticket: held,
                                sink,
                                playing,
                                ..
                            }) => {
                                *held = ticket;
                                sink.play();
                                *playing = true;
                            }
                            Some(Loaded::Failed { reason, .. }) => {
                                emit(&ticket, DeviceEventKind::StartFailed(reason.clone()));
                            }
                            None => {}
                        }
                    }

                    DeviceCmd::Pause => {
                        if let Some(Loaded::Ready { sink, playing, .. }) = loaded.as_mut() {
                            sink.pause();
                            *playing = false;
                        }
                    }

                    DeviceCmd::Seek(seconds) => {
                        if let Some(Loaded::Ready { sink, .. }) = loaded.as_ref() {
                            let pos = Duration::from_secs_f64(seconds.max(0.0));
                            if let Err(e) = sink.try_seek(pos) {
                                log::warn!("[Device] seek to {seconds:.1}s failed: {e}");
                            }
                        }
                    }

                    DeviceCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(Loaded::Ready { sink, .. }) = loaded.as_ref() {
                            sink.set_volume(volume);
                        }
                    }

                    DeviceCmd::Shutdown => {
                        if let Some(Loaded::Ready { sink, .. }) = loaded.take() {
                            sink.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // periodic progress report / end-of-stream detection
                    if let Some(Loaded::Ready {
                        ticket,
                        sink,
                        playing,
                        ..
                    }) = loaded.as_mut()
                    {
                        if *playing {
                            if sink.empty() {
                                *playing = false;
                                emit(&*ticket, DeviceEventKind::Ended);
                            } else {
                                emit(
                                    &*ticket,
                                    DeviceEventKind::TimeProgress(sink.get_pos().as_secs_f64()),
                                );
                            }
                        }
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

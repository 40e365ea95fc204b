use std::sync::mpsc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event_loop::{EventLoopState, handle_control_cmd, handle_key_event, report_diagnostic};
use crate::app::{App, Page, PromptKind, StatusKind};
use crate::audio::{
    DeviceEvent, OutputDevice, PlaybackController, PlaybackDiagnostic, Ticket, Track,
    TransportState,
};
use crate::config::Settings;
use crate::content::ContentStore;
use crate::mpris::ControlCmd;

#[derive(Default)]
struct SilentDevice;

impl OutputDevice for SilentDevice {
    fn load(&mut self, _ticket: &Ticket, _source: &str) {}
    fn play(&mut self, _ticket: &Ticket) {}
    fn pause(&mut self) {}
    fn set_current_time(&mut self, _seconds: f64) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        None
    }
}

struct Harness {
    settings: Settings,
    app: App,
    store: ContentStore,
    player: PlaybackController<SilentDevice>,
    control_tx: mpsc::Sender<ControlCmd>,
    control_rx: mpsc::Receiver<ControlCmd>,
    state: EventLoopState,
}

impl Harness {
    fn new() -> Self {
        let mut player = PlaybackController::new(SilentDevice, 0.8, "sample-1.mp3");
        let snapshots = player.subscribe();
        let (_diag_tx, diag_rx) = mpsc::channel();
        let (control_tx, control_rx) = mpsc::channel();
        let mut store = ContentStore::in_memory();
        let changes = store.subscribe();
        Self {
            settings: Settings::default(),
            app: App::new(),
            store,
            player,
            control_tx,
            control_rx,
            state: EventLoopState::new(None, diag_rx, snapshots, changes),
        }
    }

    fn press(&mut self, code: KeyCode) -> bool {
        let quit = handle_key_event(
            KeyEvent::new(code, KeyModifiers::NONE),
            &self.settings,
            &mut self.app,
            &mut self.store,
            &mut self.player,
            &self.control_tx,
            &mut self.state,
        );
        // Media-key style commands are queued; apply them like the loop does.
        while let Ok(cmd) = self.control_rx.try_recv() {
            handle_control_cmd(cmd, &mut self.player);
        }
        quit
    }

    fn keys(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }
}

#[test]
fn q_quits_outside_prompts_only() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('c'));
    assert!(!h.press(KeyCode::Char('q')));
    assert_eq!(h.app.prompt.as_ref().unwrap().value(0), "q");
    h.press(KeyCode::Esc);
    assert!(h.press(KeyCode::Char('q')));
}

#[test]
fn digits_and_tab_switch_pages() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('3'));
    assert_eq!(h.app.page, Page::Top40);
    h.press(KeyCode::Tab);
    assert_eq!(h.app.page, Page::Podcasts);
    h.press(KeyCode::BackTab);
    h.press(KeyCode::BackTab);
    assert_eq!(h.app.page, Page::Live);
}

#[test]
fn gg_and_g_jump() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('3'));
    h.press(KeyCode::Char('G'));
    assert_eq!(h.app.selected(), 9);
    h.press(KeyCode::Char('g'));
    h.press(KeyCode::Char('k'));
    assert_eq!(h.app.selected(), 8);
    h.keys("gg");
    assert_eq!(h.app.selected(), 0);
}

#[test]
fn enter_space_and_volume_drive_controller() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('3'));
    h.press(KeyCode::Enter);
    assert_eq!(h.player.state().transport, TransportState::Playing);

    h.press(KeyCode::Char(' '));
    assert_eq!(h.player.state().transport, TransportState::Paused);
    h.press(KeyCode::Char('p'));
    assert_eq!(h.player.state().transport, TransportState::Playing);

    h.press(KeyCode::Char('+'));
    assert!((h.player.state().volume - 0.85).abs() < 1e-6);
    for _ in 0..30 {
        h.press(KeyCode::Char('-'));
    }
    assert_eq!(h.player.state().volume, 0.0);
}

#[test]
fn scrub_keys_seek_by_configured_seconds() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('3'));
    h.press(KeyCode::Enter);
    h.press(KeyCode::Char('L'));
    h.press(KeyCode::Char('L'));
    assert_eq!(h.player.state().position_seconds, 10.0);
    h.press(KeyCode::Char('H'));
    assert_eq!(h.player.state().position_seconds, 5.0);
}

#[test]
fn prompt_keys_fill_and_submit() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('i'));
    h.keys("dinda@example.com");
    h.press(KeyCode::Enter);
    h.keys("pw");
    h.press(KeyCode::Backspace);
    h.press(KeyCode::Enter);
    assert!(h.app.prompt.is_none());
    assert_eq!(h.store.current_user().id, "u-1");
}

#[test]
fn admin_keys_only_on_admin_page() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('s'));
    h.press(KeyCode::Char('d'));
    assert_eq!(h.store.news().len(), 6);

    h.press(KeyCode::Char('9'));
    h.press(KeyCode::Char('d'));
    assert_eq!(h.store.news().len(), 5);
    h.press(KeyCode::Char('R'));
    h.press(KeyCode::Char('j'));
    h.press(KeyCode::Char('R'));
    assert_eq!(h.store.news().len(), 5);
    assert!(h.app.pending_reset);
    h.press(KeyCode::Char('R'));
    assert_eq!(h.store.news().len(), 6);
}

#[test]
fn control_commands_map_onto_toggle() {
    let mut player = PlaybackController::new(SilentDevice, 1.0, "sample-1.mp3");
    assert!(!handle_control_cmd(ControlCmd::Play, &mut player));
    assert_eq!(player.state().transport, TransportState::Stopped);

    player.load_placeholder(Track::new("np-1", "As It Was", "Harry Styles"));
    handle_control_cmd(ControlCmd::Pause, &mut player);
    assert_eq!(player.state().transport, TransportState::Paused);
    handle_control_cmd(ControlCmd::Play, &mut player);
    handle_control_cmd(ControlCmd::Play, &mut player);
    assert_eq!(player.state().transport, TransportState::Playing);
    handle_control_cmd(ControlCmd::Stop, &mut player);
    assert_eq!(player.state().transport, TransportState::Paused);
    handle_control_cmd(ControlCmd::PlayPause, &mut player);
    assert_eq!(player.state().transport, TransportState::Playing);

    assert!(handle_control_cmd(ControlCmd::Quit, &mut player));
}

#[test]
fn start_failures_reach_status_line() {
    let mut app = App::new();
    report_diagnostic(
        &mut app,
        PlaybackDiagnostic::InvalidSeek {
            requested: -1.0,
            applied: Some(0.0),
        },
    );
    assert!(app.status.is_none());

    report_diagnostic(
        &mut app,
        PlaybackDiagnostic::StartFailure {
            track_id: "c1".to_string(),
            reason: "no audio output".to_string(),
        },
    );
    let status = app.status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("no audio output"));
}

#[test]
fn admin_editor_keys_open_forms_on_admin_page() {
    let mut h = Harness::new();
    h.press(KeyCode::Char('a'));
    h.press(KeyCode::Char('B'));
    assert!(h.app.prompt.is_none());

    h.press(KeyCode::Char('9'));
    h.press(KeyCode::Char('B'));
    assert_eq!(h.app.prompt.as_ref().map(|p| p.kind), Some(PromptKind::EditBranding));
    h.press(KeyCode::Esc);

    h.press(KeyCode::Char('a'));
    h.keys("Studio move");
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    h.press(KeyCode::Enter);
    assert!(h.app.prompt.is_none());
    assert_eq!(h.store.news()[0].title, "Studio move");
}

use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Page, PromptKind, actions};
use crate::audio::{OutputDevice, PlaybackController, PlaybackDiagnostic, PlaybackState};
use crate::config;
use crate::content::{ContentChange, ContentStore};
use crate::interaction::ListenerChatter;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::sync_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Simulated listeners; `None` when chatter is disabled.
    pub chatter: Option<ListenerChatter>,
    /// Controller diagnostics, surfaced on the status line.
    pub diagnostics: mpsc::Receiver<PlaybackDiagnostic>,
    /// Controller snapshots, forwarded to MPRIS.
    pub snapshots: mpsc::Receiver<PlaybackState>,
    /// Store writes; lists may have shrunk under the cursor.
    pub content_changes: mpsc::Receiver<ContentChange>,
}

impl EventLoopState {
    pub fn new(
        chatter: Option<ListenerChatter>,
        diagnostics: mpsc::Receiver<PlaybackDiagnostic>,
        snapshots: mpsc::Receiver<PlaybackState>,
        content_changes: mpsc::Receiver<ContentChange>,
    ) -> Self {
        Self {
            pending_gg: false,
            chatter,
            diagnostics,
            snapshots,
            content_changes,
        }
    }
}

/// Main terminal event loop: reconciles device events, handles input, draws
/// the UI and keeps MPRIS in sync. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run<D: OutputDevice>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    store: &mut ContentStore,
    player: &mut PlaybackController<D>,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        player.pump();
        sync_mpris(mpris, &state.snapshots);

        while let Ok(diag) = state.diagnostics.try_recv() {
            report_diagnostic(app, diag);
        }

        if let Some(chatter) = state.chatter.as_mut() {
            if let Some(msg) = chatter.tick(Instant::now(), Local::now()) {
                if let Err(e) = store.send_chat(msg) {
                    log::warn!("[Chat] could not store listener message: {e}");
                }
            }
        }

        let changed: Vec<ContentChange> = state.content_changes.try_iter().collect();
        if !changed.is_empty() {
            for change in &changed {
                log::debug!("[Store] {} changed", change.key.as_str());
            }
            app.clamp_selection(actions::item_count(app, store));
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                store,
                player.state(),
                &settings.ui,
                &settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, store, player, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

pub(super) fn report_diagnostic(app: &mut App, diag: PlaybackDiagnostic) {
    match diag {
        PlaybackDiagnostic::StartFailure { reason, .. } => {
            app.error(format!("Playback failed: {reason}"));
        }
        PlaybackDiagnostic::InvalidSeek { .. } | PlaybackDiagnostic::StaleEvent { .. } => {}
    }
}

/// Apply a media-key command. Returns `true` when the app should quit.
pub(super) fn handle_control_cmd<D: OutputDevice>(
    cmd: ControlCmd,
    player: &mut PlaybackController<D>,
) -> bool {
    let playing = player.state().transport.is_playing();
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play if !playing => player.toggle(),
        // No stop on the controller; Stop pauses.
        ControlCmd::Pause | ControlCmd::Stop if playing => player.toggle(),
        ControlCmd::PlayPause => player.toggle(),
        ControlCmd::Play | ControlCmd::Pause | ControlCmd::Stop => {}
    }
    false
}

fn handle_prompt_key(key: KeyEvent, app: &mut App, store: &mut ContentStore) {
    let Some(prompt) = app.prompt.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Esc => app.close_prompt(),
        KeyCode::Tab | KeyCode::Down => prompt.next_field(),
        KeyCode::BackTab | KeyCode::Up => prompt.prev_field(),
        KeyCode::Backspace => prompt.pop_char(),
        KeyCode::Enter => {
            if prompt.on_last_field() {
                actions::submit_prompt(app, store, Local::now());
            } else {
                prompt.next_field();
            }
        }
        KeyCode::Char(c) if !c.is_control() => prompt.push_char(c),
        _ => {}
    }
}

/// Route one key press. Returns `true` when the app should quit.
pub(super) fn handle_key_event<D: OutputDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    store: &mut ContentStore,
    player: &mut PlaybackController<D>,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    if app.prompt.is_some() {
        state.pending_gg = false;
        handle_prompt_key(key, app, store);
        return false;
    }

    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    if key.code != KeyCode::Char('R') {
        app.pending_reset = false;
    }

    let count = actions::item_count(app, store);
    let scrub = settings.controls.scrub_seconds as f64;
    let step = settings.audio.volume_step;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.next_page(),
        KeyCode::BackTab => app.prev_page(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                app.goto_page(n as usize);
            }
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.select_last(count),
        KeyCode::Char('j') | KeyCode::Down => app.next(count),
        KeyCode::Char('k') | KeyCode::Up => app.prev(count),
        KeyCode::Enter => actions::activate(app, store, player),
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('L') => player.seek_by(scrub),
        KeyCode::Char('H') => player.seek_by(-scrub),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            player.set_volume(player.state().volume + step);
        }
        KeyCode::Char('-') => player.set_volume(player.state().volume - step),
        KeyCode::Char('v') => actions::vote_selected(app, store),
        KeyCode::Char('c') => actions::open_prompt(app, store, PromptKind::Chat),
        KeyCode::Char('r') => actions::open_prompt(app, store, PromptKind::SongRequest),
        KeyCode::Char('i') => actions::open_prompt(app, store, PromptKind::Login),
        KeyCode::Char('n') => actions::open_prompt(app, store, PromptKind::Register),
        KeyCode::Char('e') => actions::open_prompt(app, store, PromptKind::EditProfile),
        KeyCode::Char('w') => actions::open_prompt(app, store, PromptKind::ChangePassword),
        KeyCode::Char('m') => actions::mark_notifications_read(app, store),
        KeyCode::Char('s') if app.page == Page::Admin => app.cycle_admin_section(),
        KeyCode::Char('d') => actions::admin_delete(app, store),
        KeyCode::Char('b') => actions::admin_toggle_ban(app, store),
        KeyCode::Char('o') => actions::admin_cycle_role(app, store),
        KeyCode::Char('a') => actions::admin_add(app, store),
        KeyCode::Char('u') => actions::admin_edit_user(app, store),
        KeyCode::Char(c @ ('P' | 'B' | 'A' | 'F')) if app.page == Page::Admin => {
            let kind = match c {
                'P' => PromptKind::EditPoll,
                'B' => PromptKind::EditBranding,
                'A' => PromptKind::EditAbout,
                _ => PromptKind::EditHome,
            };
            actions::open_prompt(app, store, kind);
        }
        KeyCode::Char('R') => actions::admin_reset(app, store),
        _ => {}
    }

    false
}

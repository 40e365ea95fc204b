use std::sync::mpsc;
use std::time::Instant;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::interaction::ListenerChatter;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    crate::logging::init(&settings.logging);
    if let Some(msg) = config_warning {
        log::warn!("[Config] {msg}");
    }

    let mut store = startup::open_store(&settings.content);
    let content_changes = store.subscribe();
    let (mut player, diagnostics) = startup::build_player(&settings);
    let snapshots = player.subscribe();

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx.clone());
    mpris.set_snapshot(player.state());

    let chatter = settings
        .content
        .chatter
        .then(|| ListenerChatter::from_settings(&settings.content, Instant::now()));
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(chatter, diagnostics, snapshots, content_changes);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut store,
            &mut player,
            &mpris,
            &control_tx,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    player.shutdown();
    log::info!("[Main] shut down");
    run_result
}

#[cfg(test)]
mod tests;

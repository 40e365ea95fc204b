use ratatui::{Terminal, backend::TestBackend};

use super::*;
use crate::audio::{PlaybackState, Track, TransportState};

fn rendered(app: &App, store: &ContentStore, playback: &PlaybackState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal
        .draw(|f| {
            draw(
                f,
                app,
                store,
                playback,
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn mmss_formats_and_floors() {
    assert_eq!(format_mmss(0.0), "00:00");
    assert_eq!(format_mmss(61.9), "01:01");
    assert_eq!(format_mmss(-3.0), "00:00");
    assert_eq!(format_mmss(f64::NAN), "00:00");
}

#[test]
fn time_text_waits_for_duration() {
    let ui = UiSettings::default();
    assert_eq!(now_playing_time_text(5.0, None, &ui).as_deref(), Some("00:05"));
    assert_eq!(
        now_playing_time_text(5.0, Some(185.0), &ui).as_deref(),
        Some("00:05 / 03:05 / -03:00")
    );

    let ui = UiSettings {
        now_playing_time_fields: vec![TimeField::Remaining],
        ..UiSettings::default()
    };
    assert_eq!(now_playing_time_text(5.0, None, &ui), None);
    assert_eq!(
        now_playing_time_text(200.0, Some(185.0), &ui).as_deref(),
        Some("-00:00")
    );
}

#[test]
fn controls_follow_page() {
    let home = controls_text(Page::Home, 5);
    assert!(home.contains("[H/L] scrub -/+5s"));
    assert!(!home.contains("[d] delete"));
    assert!(home.ends_with("[q] quit"));

    let admin = controls_text(Page::Admin, 10);
    assert!(admin.contains("[d] delete"));
    assert!(admin.contains("[R] reset"));
    assert!(admin.contains("[a] add"));
    assert!(admin.contains("[P/B/A/F] poll/brand/about/front"));
}

#[test]
fn centered_rect_stays_inside() {
    let outer = Rect::new(0, 0, 40, 10);
    let r = centered_rect_sized(64, 20, outer);
    assert!(r.width <= 38 && r.height <= 8);
    assert!(r.x + r.width <= outer.width);
}

#[test]
fn player_bar_shows_live_badge() {
    let app = App::new();
    let store = ContentStore::in_memory();
    let playback = PlaybackState {
        current: Some(Track::new("live-stream", "Morning Drive", "Host: Ryo").live()),
        transport: TransportState::Playing,
        is_live: true,
        ..PlaybackState::default()
    };

    let screen = rendered(&app, &store, &playback);
    assert!(screen.contains("LIVE"));
    assert!(screen.contains("Morning Drive"));
    assert!(screen.contains("[Playing]"));
    assert!(screen.contains("on air"));
}

#[test]
fn every_page_renders() {
    let mut app = App::new();
    let store = ContentStore::in_memory();
    let playback = PlaybackState::default();

    for page in Page::ALL {
        app.set_page(page);
        let screen = rendered(&app, &store, &playback);
        assert!(screen.contains("Nothing loaded"), "{page:?}");
    }

    app.set_page(Page::Top40);
    assert!(rendered(&app, &store, &playback).contains("#1"));
}

#[test]
fn prompt_masks_secrets() {
    let mut app = App::new();
    let store = ContentStore::in_memory();
    let mut prompt = Prompt::new(crate::app::PromptKind::Login);
    prompt.next_field();
    for c in "hunter2".chars() {
        prompt.push_char(c);
    }
    app.open_prompt(prompt);

    let screen = rendered(&app, &store, &PlaybackState::default());
    assert!(screen.contains("log in"));
    assert!(!screen.contains("hunter2"));
    assert!(screen.contains("•••••••"));
}

//! UI rendering helpers for the terminal user interface.
//!
//! This module draws the shell using `ratatui`: header, page sidebar, the
//! current page, the sticky player bar, the status line and the controls
//! footer. Page bodies live in `ui::pages`.

mod pages;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Page, Prompt, StatusKind};
use crate::audio::PlaybackState;
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::content::ContentStore;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("tab/1-9", "pages");
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play/select");
    map.insert("space/p", "play/pause");
    // H/L is filled dynamically from config.
    map.insert("+/-", "volume");
    map.insert("v", "vote song");
    map.insert("c", "chat");
    map.insert("r", "request");
    map.insert("i/n", "log in/register");
    map.insert("e/w", "profile/password");
    map.insert("s", "section");
    map.insert("d", "delete");
    map.insert("b/o", "ban/role");
    map.insert("a", "add");
    map.insert("u", "edit user");
    map.insert("P/B/A/F", "poll/brand/about/front");
    map.insert("m", "mark read");
    map.insert("R", "reset");
    map.insert("q", "quit");
    map
});

/// Render the controls help text for `page`, incorporating scrub seconds.
fn controls_text(page: Page, scrub_seconds: u64) -> String {
    let page_keys: &[&str] = match page {
        Page::Top40 => &["v"],
        Page::Interaction => &["v", "c", "r"],
        Page::Account => &["i/n", "e/w"],
        Page::Admin => &["s", "a", "u", "d", "b/o", "P/B/A/F", "m", "R"],
        _ => &[],
    };
    let order = ["tab/1-9", "j/k", "gg/G", "enter", "space/p", "H/L", "+/-"];
    order
        .iter()
        .chain(page_keys)
        .chain(std::iter::once(&"q"))
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] scrub -/+{scrub_seconds}s"))
            } else {
                CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format seconds as `MM:SS`. Anything not a positive finite number is `00:00`.
fn format_mmss(seconds: f64) -> String {
    let secs = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
///
/// `total` is `None` until the device has reported a duration.
fn now_playing_time_text(elapsed: f64, total: Option<f64>, ui: &UiSettings) -> Option<String> {
    if ui.now_playing_time_fields.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mmss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mmss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    parts.push(format!("-{}", format_mmss((t - elapsed).max(0.0))));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// A bordered, selectable list with the shared highlight style.
fn render_list(frame: &mut Frame, area: Rect, title: &str, items: Vec<ListItem>, selected: usize) {
    let total = items.len();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected.min(total - 1)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the entire UI into `frame`.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    store: &ContentStore,
    playback: &PlaybackState,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], store, ui_settings);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(1)])
        .split(chunks[1]);
    draw_sidebar(frame, body[0], app);
    pages::draw_page(frame, body[1], app, store, playback);

    draw_player_bar(frame, chunks[2], playback, ui_settings);

    if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        };
        frame.render_widget(Paragraph::new(format!(" {}", status.text)).style(style), chunks[3]);
    }

    let footer = Paragraph::new(controls_text(app.page, controls_settings.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    if let Some(prompt) = &app.prompt {
        draw_prompt(frame, body[1], prompt);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, store: &ContentStore, ui: &UiSettings) {
    let branding = store.branding();
    let user = store.current_user();
    let unread = store.unread_notifications();

    let mut text = format!("{}  •  {}", ui.header_text, user.name);
    if unread > 0 {
        text.push_str(&format!("  •  {unread} new"));
    }
    let header = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", branding.site_title))
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(header, area);
}

fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| ListItem::new(format!("{} {}", i + 1, p.title())))
        .collect();
    render_list(frame, area, "menu", items, app.page.index());
}

fn draw_player_bar(frame: &mut Frame, area: Rect, playback: &PlaybackState, ui: &UiSettings) {
    let block = Block::bordered().padding(left_pad()).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let Some(track) = &playback.current else {
        frame.render_widget(Paragraph::new("Nothing loaded"), rows[0]);
        return;
    };

    let mut spans = Vec::new();
    if playback.is_live {
        spans.push(Span::styled(" LIVE ", Style::default().bg(Color::Red).bold()));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::raw(track.title.as_str()).bold());
    spans.push(Span::raw(format!(" · {}", track.artist)));
    spans.push(Span::raw(format!("  [{}]", playback.transport.label())));
    if !playback.is_live {
        let total = playback
            .duration_known
            .then_some(playback.duration_seconds);
        if let Some(time) = now_playing_time_text(playback.position_seconds, total, ui) {
            spans.push(Span::raw(format!("  {time}")));
        }
    }
    spans.push(Span::raw(format!("  vol {:.0}%", playback.volume * 100.0)).dim());
    frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

    let label = if playback.is_live {
        "on air".to_string()
    } else {
        format!("{:.0}%", playback.progress() * 100.0)
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(playback.progress())
        .label(label);
    frame.render_widget(gauge, rows[1]);
}

fn draw_prompt(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let height = prompt.fields.len() as u16 + 4;
    let popup = centered_rect_sized(64, height, area);
    frame.render_widget(Clear, popup);

    let mut lines: Vec<Line> = prompt
        .fields
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let value = if f.secret {
                "•".repeat(f.value.chars().count())
            } else {
                f.value.clone()
            };
            if i == prompt.focus {
                Line::from(format!("> {}: {value}_", f.label)).bold()
            } else {
                Line::from(format!("  {}: {value}", f.label))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from("[tab] next field | [enter] submit | [esc] cancel").dim());

    let body = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(left_pad())
                .title(prompt.kind.title()),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests;

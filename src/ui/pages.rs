//! Page bodies for the content area.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Paragraph, Wrap},
};

use super::{left_pad, render_list};
use crate::app::{AdminSection, App, Page};
use crate::audio::PlaybackState;
use crate::content::{ContentStore, LIVE_STREAM_ID, Trend};

/// Marker shown beside the row whose track is loaded.
fn now_marker(playback: &PlaybackState, track_id: &str) -> &'static str {
    if playback.is_playing_track(track_id) {
        "▶ "
    } else if playback.current_id() == Some(track_id) {
        "⏸ "
    } else {
        "  "
    }
}

fn text_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(left_pad())
        .title(format!(" {title} "))
}

pub(super) fn draw_page(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    store: &ContentStore,
    playback: &PlaybackState,
) {
    match app.page {
        Page::Home => draw_home(frame, area, store, playback),
        Page::Live => draw_live(frame, area, app, store, playback),
        Page::Top40 => draw_charts(frame, area, app, store, playback),
        Page::Podcasts => draw_podcasts(frame, area, app, store, playback),
        Page::News => draw_news(frame, area, app, store),
        Page::Interaction => draw_interaction(frame, area, app, store),
        Page::About => draw_about(frame, area, app, store),
        Page::Account => draw_account(frame, area, store),
        Page::Admin => draw_admin(frame, area, app, store),
    }
}

fn draw_home(frame: &mut Frame, area: Rect, store: &ContentStore, playback: &PlaybackState) {
    let hero = store.home().hero;
    let action = if playback.is_playing_track(crate::content::HERO_AUDIO_ID) {
        "[enter] pause"
    } else {
        "[enter] listen"
    };

    let mut lines = vec![
        Line::from(hero.tagline).dim(),
        Line::from(hero.title).bold(),
        Line::from(""),
        Line::from(hero.description),
        Line::from(""),
        Line::from(format!("{action}: {}", hero.cta_text)).fg(Color::Cyan),
    ];
    if let Some(show) = store.shows().first() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "On air now: {} with {} ({})",
            show.title, show.host, show.time
        )));
    }
    let news = store.news();
    if !news.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from("Latest").bold());
        for item in news.iter().take(3) {
            lines.push(Line::from(format!("  {} · {}", item.category, item.title)));
        }
    }

    let body = Paragraph::new(lines)
        .block(text_block("home"))
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);
}

fn draw_live(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    store: &ContentStore,
    playback: &PlaybackState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let shows = store.shows();
    let on_air = match shows.first() {
        Some(show) => vec![
            Line::from(vec![
                Span::styled(" ON AIR ", Style::default().bg(Color::Red).bold()),
                Span::raw(format!(" {}{}", now_marker(playback, LIVE_STREAM_ID), show.title)),
            ]),
            Line::from(format!("Host: {}  ·  {}", show.host, show.time)),
            Line::from(show.description.as_str()).dim(),
        ],
        None => vec![Line::from("Off air")],
    };
    frame.render_widget(
        Paragraph::new(on_air)
            .block(text_block("live"))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let items = shows
        .iter()
        .map(|s| ListItem::new(format!("{:<14} {} · {}", s.time, s.title, s.host)))
        .collect();
    render_list(frame, chunks[1], "schedule", items, app.selected());
}

fn trend_span(trend: Trend) -> Span<'static> {
    let color = match trend {
        Trend::Up => Color::Green,
        Trend::Down => Color::Red,
        Trend::Same => Color::Gray,
        Trend::New => Color::Yellow,
    };
    Span::styled(trend.label(), Style::default().fg(color))
}

fn draw_charts(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    store: &ContentStore,
    playback: &PlaybackState,
) {
    let items = store
        .charts()
        .into_iter()
        .map(|item| {
            let voted = if app.votes.has_voted(&item.song.id) { " ♥" } else { "" };
            ListItem::new(Line::from(vec![
                Span::raw(now_marker(playback, &item.song.id)),
                Span::raw(format!("#{:<3}", item.rank)).bold(),
                Span::raw(format!("{} · {}  {}  ", item.song.title, item.song.artist, item.song.duration)),
                trend_span(item.trend),
                Span::raw(voted),
            ]))
        })
        .collect();
    render_list(frame, area, "top 40", items, app.selected());
}

fn draw_podcasts(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    store: &ContentStore,
    playback: &PlaybackState,
) {
    let items = store
        .podcasts()
        .into_iter()
        .map(|p| {
            ListItem::new(format!(
                "{}{} · {} · {} · {}",
                now_marker(playback, &p.id),
                p.title,
                p.category,
                p.date,
                p.duration
            ))
        })
        .collect();
    render_list(frame, area, "podcasts", items, app.selected());
}

fn draw_news(frame: &mut Frame, area: Rect, app: &App, store: &ContentStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(6)])
        .split(area);

    let news = store.news();
    let items = news
        .iter()
        .map(|n| ListItem::new(format!("[{}] {} ({})", n.category, n.title, n.date)))
        .collect();
    render_list(frame, chunks[0], "news", items, app.selected());

    let detail = news
        .get(app.selected())
        .map(|n| n.excerpt.clone())
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(detail)
            .block(text_block("story"))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_interaction(frame: &mut Frame, area: Rect, app: &App, store: &ContentStore) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let poll = store.poll();
    let options = poll.options.iter().map(|o| {
        let pct = poll.percent(o);
        let bar = "█".repeat((pct / 5) as usize);
        ListItem::new(format!("{:<22} {bar} {pct}%", o.text))
    });
    let candidates = app.votes.candidates().iter().map(|c| {
        let mark = if app.votes.has_voted(&c.id) { "♥" } else { " " };
        ListItem::new(format!("{mark} {} · {} ({} votes)", c.title, c.artist, c.votes))
    });
    let items = options.chain(candidates).collect();
    let title = format!("poll: {} ({} votes)", poll.question, poll.total_votes());
    render_list(frame, chunks[0], &title, items, app.selected());

    let chat = store.chat();
    let visible = chunks[1].height.saturating_sub(2) as usize;
    let lines: Vec<Line> = chat
        .iter()
        .skip(chat.len().saturating_sub(visible))
        .map(|m| {
            let name = if m.is_staff() {
                Span::styled(m.user_name.as_str(), Style::default().fg(Color::Yellow).bold())
            } else {
                Span::raw(m.user_name.as_str()).bold()
            };
            Line::from(vec![
                Span::raw(format!("{} ", m.timestamp)).dim(),
                name,
                Span::raw(format!(": {}", m.text)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .block(text_block("live chat"))
            .wrap(Wrap { trim: true }),
        chunks[1],
    );
}

fn draw_about(frame: &mut Frame, area: Rect, app: &App, store: &ContentStore) {
    let about = store.about();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3), Constraint::Length(5)])
        .split(area);

    let story = vec![
        Line::from(format!("{} {}", about.hero.title_line1, about.hero.title_line2)).bold(),
        Line::from(about.hero.subtitle.as_str()).dim(),
        Line::from(""),
        Line::from(about.story.description1.as_str()),
        Line::from(about.story.description2.as_str()),
        Line::from(format!(
            "{} {}  ·  {} {}",
            about.story.stat1_value,
            about.story.stat1_label,
            about.story.stat2_value,
            about.story.stat2_label
        ))
        .fg(Color::Cyan),
    ];
    frame.render_widget(
        Paragraph::new(story)
            .block(text_block(&about.story.title))
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let items = about
        .dna
        .items
        .iter()
        .map(|d| ListItem::new(format!("{}: {}", d.title, d.desc)))
        .collect();
    render_list(frame, chunks[1], &about.dna.title, items, app.selected());

    let networks = store
        .networks()
        .iter()
        .map(|n| format!("{} {}", n.city, n.freq))
        .collect::<Vec<_>>()
        .join("  ·  ");
    let contact = vec![
        Line::from(format!(
            "{}  ·  {}  ·  {}",
            about.contact.address, about.contact.email, about.contact.phone
        )),
        Line::from(networks).dim(),
    ];
    frame.render_widget(
        Paragraph::new(contact)
            .block(text_block("contact"))
            .wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn draw_account(frame: &mut Frame, area: Rect, store: &ContentStore) {
    let user = store.current_user();
    let mut lines = vec![
        Line::from(user.name.as_str()).bold(),
        Line::from(user.email.as_str()),
        Line::from(format!("Role: {}  ·  Joined {}", user.role.label(), user.joined_date)),
    ];
    if let Some(bio) = &user.bio {
        lines.push(Line::from(""));
        lines.push(Line::from(bio.as_str()).italic());
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("Notifications ({} unread)", store.unread_notifications())).bold());
    for n in store.notifications() {
        let mark = if n.read { " " } else { "•" };
        lines.push(Line::from(format!("{mark} {} · {} ({})", n.title, n.message, n.time)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(text_block("account"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn admin_rows(section: AdminSection, store: &ContentStore) -> Vec<String> {
    match section {
        AdminSection::News => store
            .news()
            .into_iter()
            .map(|n| format!("{} · {}", n.title, n.category))
            .collect(),
        AdminSection::Charts => store
            .charts()
            .into_iter()
            .map(|c| format!("#{} {} · {} ({})", c.rank, c.song.title, c.song.artist, c.trend.label()))
            .collect(),
        AdminSection::Podcasts => store
            .podcasts()
            .into_iter()
            .map(|p| format!("{} · {}", p.title, p.category))
            .collect(),
        AdminSection::Shows => store
            .shows()
            .into_iter()
            .map(|s| format!("{} · {} · {}", s.time, s.title, s.host))
            .collect(),
        AdminSection::Networks => store
            .networks()
            .into_iter()
            .map(|n| format!("{} {}", n.city, n.freq))
            .collect(),
        AdminSection::Users => store
            .users()
            .into_iter()
            .map(|u| {
                let banned = if u.is_banned() { "  [banned]" } else { "" };
                format!("{} <{}> {}{banned}", u.name, u.email, u.role.label())
            })
            .collect(),
        AdminSection::Chat => store
            .chat()
            .into_iter()
            .map(|m| format!("{} {}: {}", m.timestamp, m.user_name, m.text))
            .collect(),
        AdminSection::Notifications => store
            .notifications()
            .into_iter()
            .map(|n| {
                let mark = if n.read { " " } else { "•" };
                format!("{mark} {} · {}", n.title, n.message)
            })
            .collect(),
    }
}

fn draw_admin(frame: &mut Frame, area: Rect, app: &App, store: &ContentStore) {
    let items = admin_rows(app.admin_section, store)
        .into_iter()
        .map(ListItem::new)
        .collect();
    let title = format!("admin: {} ([s] next section)", app.admin_section.label());
    render_list(frame, area, &title, items, app.selected());
}

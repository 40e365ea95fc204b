use chrono::{DateTime, Local, TimeZone};

use super::actions::*;
use super::*;
use crate::audio::{DeviceEvent, OutputDevice, PlaybackController, Ticket, TransportState};
use crate::content::{ContentStore, UserRole, UserStatus, HERO_AUDIO_ID, LIVE_STREAM_ID};

/// Accepts every command and never reports anything.
#[derive(Default)]
struct SilentDevice {
    loads: Vec<String>,
}

impl OutputDevice for SilentDevice {
    fn load(&mut self, _ticket: &Ticket, source: &str) {
        self.loads.push(source.to_string());
    }
    fn play(&mut self, _ticket: &Ticket) {}
    fn pause(&mut self) {}
    fn set_current_time(&mut self, _seconds: f64) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn poll_event(&mut self) -> Option<DeviceEvent> {
        None
    }
}

fn player() -> PlaybackController<SilentDevice> {
    PlaybackController::new(SilentDevice::default(), 0.8, "sample-1.mp3")
}

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 20, 15, 0).unwrap()
}

fn type_into(app: &mut App, values: &[&str]) {
    let prompt = app.prompt.as_mut().expect("prompt open");
    for (i, v) in values.iter().enumerate() {
        prompt.focus = i;
        for c in v.chars() {
            prompt.push_char(c);
        }
    }
}

#[test]
fn page_navigation_wraps_and_jumps() {
    let mut app = App::new();
    assert_eq!(app.page, Page::Home);
    app.prev_page();
    assert_eq!(app.page, Page::Admin);
    app.next_page();
    app.next_page();
    assert_eq!(app.page, Page::Live);

    app.goto_page(3);
    assert_eq!(app.page, Page::Top40);
    app.goto_page(0);
    app.goto_page(42);
    assert_eq!(app.page, Page::Top40);
}

#[test]
fn cursors_are_kept_per_page() {
    let mut app = App::new();
    app.set_page(Page::Top40);
    app.next(10);
    app.next(10);
    assert_eq!(app.selected(), 2);

    app.set_page(Page::News);
    assert_eq!(app.selected(), 0);
    app.prev(6);
    assert_eq!(app.selected(), 5);

    app.set_page(Page::Top40);
    assert_eq!(app.selected(), 2);
    app.select_last(10);
    assert_eq!(app.selected(), 9);
    app.next(10);
    assert_eq!(app.selected(), 0);

    app.select_last(10);
    app.clamp_selection(4);
    assert_eq!(app.selected(), 3);
}

#[test]
fn prompt_editing_moves_between_fields() {
    let mut prompt = Prompt::new(PromptKind::Login);
    prompt.push_char('a');
    prompt.next_field();
    prompt.push_char('x');
    prompt.push_char('y');
    prompt.pop_char();
    assert_eq!(prompt.value(0), "a");
    assert_eq!(prompt.value(1), "x");
    assert!(prompt.fields[1].secret);
    assert!(prompt.on_last_field());
    prompt.next_field();
    assert_eq!(prompt.focus, 0);
    prompt.prev_field();
    assert_eq!(prompt.focus, 1);
    assert_eq!(prompt.value(7), "");
}

#[test]
fn enter_on_chart_row_plays_then_toggles() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    let mut player = player();

    app.set_page(Page::Top40);
    app.next(item_count(&app, &store));
    let song = store.charts()[1].song.clone();

    activate(&mut app, &mut store, &mut player);
    assert_eq!(player.state().current_id(), Some(song.id.as_str()));
    assert_eq!(player.state().transport, TransportState::Playing);

    activate(&mut app, &mut store, &mut player);
    assert_eq!(player.state().transport, TransportState::Paused);
    assert_eq!(player.device().loads.len(), 1);
    assert!(app.status.as_ref().unwrap().text.starts_with("Paused"));
}

#[test]
fn live_page_always_streams_the_on_air_show() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    let mut player = player();

    app.set_page(Page::Live);
    app.next(item_count(&app, &store));
    activate(&mut app, &mut store, &mut player);

    let state = player.state();
    assert_eq!(state.current_id(), Some(LIVE_STREAM_ID));
    assert!(state.is_live);
    assert_eq!(state.current.as_ref().unwrap().title, store.shows()[0].title);
}

#[test]
fn home_enter_plays_hero_with_site_artist() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    let mut player = player();

    activate(&mut app, &mut store, &mut player);
    let current = player.state().current.clone().unwrap();
    assert_eq!(current.id, HERO_AUDIO_ID);
    assert_eq!(current.artist, "ONAIR Special");
}

#[test]
fn podcast_without_audio_uses_default_source() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    let mut player = player();

    app.set_page(Page::Podcasts);
    activate(&mut app, &mut store, &mut player);
    assert_eq!(player.device().loads, vec!["sample-1.mp3".to_string()]);
    assert_eq!(
        player.state().current.as_ref().unwrap().id,
        store.podcasts()[0].id
    );
}

#[test]
fn interaction_votes_poll_once_then_candidates() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    let mut player = player();

    app.set_page(Page::Interaction);
    activate(&mut app, &mut store, &mut player);
    assert_eq!(store.poll().options[0].votes, 46);

    app.next(item_count(&app, &store));
    activate(&mut app, &mut store, &mut player);
    assert_eq!(store.poll().options[1].votes, 30);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

    // Past the poll options are the song-vote candidates.
    let options = store.poll().options.len();
    for _ in 1..options {
        app.next(item_count(&app, &store));
    }
    vote_selected(&mut app, &store);
    assert!(app.votes.has_voted("v1"));
    assert_eq!(player.state().transport, TransportState::Stopped);
}

#[test]
fn chart_song_vote_counts_once() {
    let mut app = App::new();
    let store = ContentStore::in_memory();
    app.set_page(Page::Top40);

    vote_selected(&mut app, &store);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Info);
    vote_selected(&mut app, &store);
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);
}

#[test]
fn chat_prompt_posts_and_closes() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();

    open_prompt(&mut app, &store, PromptKind::Chat);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_some());

    type_into(&mut app, &["hello studio"]);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_none());
    assert_eq!(store.chat().last().unwrap().text, "hello studio");
    assert_eq!(store.chat().last().unwrap().timestamp, "20:15");
}

#[test]
fn login_and_register_prompts_switch_user() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();

    open_prompt(&mut app, &store, PromptKind::Login);
    type_into(&mut app, &["spam@bot.com", "pw"]);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_some());
    assert_eq!(app.status.as_ref().unwrap().kind, StatusKind::Error);

    open_prompt(&mut app, &store, PromptKind::Register);
    type_into(&mut app, &["Sari", "sari@example.com", "pw", "pw"]);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_none());
    assert_eq!(store.current_user().email, "sari@example.com");
    assert_eq!(app.status.as_ref().unwrap().text, "Welcome to ONAIR, Sari!");
}

#[test]
fn edit_profile_prompt_is_prefilled() {
    let mut app = App::new();
    let store = ContentStore::in_memory();
    open_prompt(&mut app, &store, PromptKind::EditProfile);
    assert_eq!(app.prompt.as_ref().unwrap().value(0), "Listener");
}

#[test]
fn song_request_prompt_creates_notification() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    open_prompt(&mut app, &store, PromptKind::SongRequest);
    type_into(&mut app, &["Tulus", "Monokrom", ""]);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_none());
    assert_eq!(store.unread_notifications(), 3);
}

#[test]
fn admin_actions_require_admin_role() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    accounts_login(&mut store, "dinda@example.com");

    app.set_page(Page::Admin);
    admin_delete(&mut app, &mut store);
    assert_eq!(store.news().len(), 6);
    assert_eq!(app.status.as_ref().unwrap().text, "Admins only");

    open_prompt(&mut app, &store, PromptKind::AddNews);
    assert!(app.prompt.is_none());
}

fn accounts_login(store: &mut ContentStore, email: &str) {
    crate::accounts::login(store, email, "pw").unwrap();
}

#[test]
fn admin_delete_follows_section() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    app.set_page(Page::Admin);

    app.select_last(item_count(&app, &store));
    admin_delete(&mut app, &mut store);
    assert_eq!(store.news().len(), 5);
    assert_eq!(app.selected(), 4);

    app.cycle_admin_section();
    assert_eq!(app.admin_section, AdminSection::Charts);
    assert_eq!(app.selected(), 0);
    admin_delete(&mut app, &mut store);
    let charts = store.charts();
    assert_eq!(charts.len(), 9);
    assert_eq!(charts[0].rank, 1);

    while app.admin_section != AdminSection::Users {
        app.cycle_admin_section();
    }
    // The first user is the signed-in admin.
    admin_delete(&mut app, &mut store);
    assert_eq!(store.users().len(), 5);
}

#[test]
fn admin_ban_and_role_cycle() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    app.set_page(Page::Admin);
    while app.admin_section != AdminSection::Users {
        app.cycle_admin_section();
    }
    app.next(item_count(&app, &store));

    admin_toggle_ban(&mut app, &mut store);
    assert_eq!(store.users()[1].status, UserStatus::Banned);
    admin_toggle_ban(&mut app, &mut store);
    assert_eq!(store.users()[1].status, UserStatus::Active);

    admin_cycle_role(&mut app, &mut store);
    assert_eq!(store.users()[1].role, UserRole::Moderator);
}

#[test]
fn admin_add_news_goes_to_front() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    app.set_page(Page::Admin);
    open_prompt(&mut app, &store, PromptKind::AddNews);
    type_into(&mut app, &["Studio move", "", "New home downtown."]);
    submit_prompt(&mut app, &mut store, now());

    let first = &store.news()[0];
    assert_eq!(first.title, "Studio move");
    assert_eq!(first.category, "News");
    assert_eq!(first.date, "Mar 9, 2024");
}

#[test]
fn admin_reset_needs_confirmation() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    store.clear_notifications().unwrap();
    app.set_page(Page::Admin);

    admin_reset(&mut app, &mut store);
    assert!(app.pending_reset);
    assert!(store.notifications().is_empty());

    admin_reset(&mut app, &mut store);
    assert!(!app.pending_reset);
    assert_eq!(store.notifications().len(), 3);
}

#[test]
fn leaving_admin_disarms_reset() {
    let mut app = App::new();
    let mut store = ContentStore::in_memory();
    app.set_page(Page::Admin);
    admin_reset(&mut app, &mut store);
    app.next_page();
    app.prev_page();
    assert!(!app.pending_reset);
}

fn admin_on(section: AdminSection) -> App {
    let mut app = App::new();
    app.set_page(Page::Admin);
    while app.admin_section != section {
        app.cycle_admin_section();
    }
    app
}

#[test]
fn add_key_opens_the_form_for_the_section() {
    let store = ContentStore::in_memory();
    for (section, kind) in [
        (AdminSection::News, PromptKind::AddNews),
        (AdminSection::Shows, PromptKind::AddShow),
        (AdminSection::Podcasts, PromptKind::AddPodcast),
        (AdminSection::Networks, PromptKind::AddNetwork),
        (AdminSection::Users, PromptKind::AddUser),
        (AdminSection::Chat, PromptKind::HostMessage),
    ] {
        let mut app = admin_on(section);
        admin_add(&mut app, &store);
        assert_eq!(app.prompt.as_ref().map(|p| p.kind), Some(kind));
    }

    let mut app = admin_on(AdminSection::Charts);
    admin_add(&mut app, &store);
    assert!(app.prompt.is_none());
    assert_eq!(app.status.as_ref().unwrap().text, "Nothing to add to charts");
}

#[test]
fn admin_adds_show_podcast_and_network() {
    let mut store = ContentStore::in_memory();

    let mut app = admin_on(AdminSection::Shows);
    admin_add(&mut app, &store);
    type_into(&mut app, &["Night Shift", "Maya", "22:00 - 02:00", "Late tunes"]);
    submit_prompt(&mut app, &mut store, now());
    let show = store.shows().pop().unwrap();
    assert_eq!(show.id, format!("s-{}", now().timestamp_millis()));
    assert_eq!(show.host, "Maya");

    let mut app = admin_on(AdminSection::Podcasts);
    admin_add(&mut app, &store);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_some());
    type_into(&mut app, &["Studio Talk", "", "", "talk.mp3"]);
    submit_prompt(&mut app, &mut store, now());
    let episode = &store.podcasts()[0];
    assert_eq!(episode.title, "Studio Talk");
    assert_eq!(episode.category, "Lifestyle");
    assert_eq!(episode.duration, "0 Min");
    assert_eq!(episode.audio_url.as_deref(), Some("talk.mp3"));

    let mut app = admin_on(AdminSection::Networks);
    let before = store.networks().len();
    admin_add(&mut app, &store);
    type_into(&mut app, &["Medan", "97.5 FM"]);
    submit_prompt(&mut app, &mut store, now());
    assert_eq!(store.networks().len(), before + 1);
    assert_eq!(store.networks().last().unwrap().city, "Medan");
}

#[test]
fn admin_creates_and_edits_users() {
    let mut store = ContentStore::in_memory();
    let mut app = admin_on(AdminSection::Users);

    admin_add(&mut app, &store);
    type_into(&mut app, &["Maya", "maya@onair.fm", "moderator", ""]);
    submit_prompt(&mut app, &mut store, now());
    assert!(app.prompt.is_none());
    assert_eq!(store.users()[0].role, UserRole::Moderator);
    assert_eq!(store.users().len(), 6);

    // Row 2 is Dinda once Maya sits at the front.
    app.next(item_count(&app, &store));
    app.next(item_count(&app, &store));
    admin_edit_user(&mut app, &store);
    let prompt = app.prompt.as_mut().unwrap();
    assert_eq!(prompt.target.as_deref(), Some("u-1"));
    assert_eq!(prompt.value(1), "dinda@example.com");
    prompt.focus = 2;
    for _ in 0.."user".len() {
        prompt.pop_char();
    }
    for c in "admin".chars() {
        prompt.push_char(c);
    }
    submit_prompt(&mut app, &mut store, now());

    let dinda = store.find_user_by_email("dinda@example.com").unwrap();
    assert_eq!(dinda.role, UserRole::Admin);
    assert_eq!(dinda.joined_date, "2023-05-20");
    assert_eq!(store.users().len(), 6);
}

#[test]
fn host_message_goes_to_chat() {
    let mut store = ContentStore::in_memory();
    let mut app = admin_on(AdminSection::Chat);
    admin_add(&mut app, &store);
    type_into(&mut app, &["Thanks for tuning in"]);
    submit_prompt(&mut app, &mut store, now());

    let last = store.chat().pop().unwrap();
    assert_eq!(last.text, "Thanks for tuning in");
    assert_eq!(last.user_name, "ONAIR Host");
}

#[test]
fn poll_editor_is_prefilled_and_keeps_votes() {
    let mut store = ContentStore::in_memory();
    let mut app = admin_on(AdminSection::News);
    open_prompt(&mut app, &store, PromptKind::EditPoll);
    let prompt = app.prompt.as_mut().unwrap();
    assert_eq!(prompt.value(1), "Sheila on 7 | Tulus | Nadin Amizah | Hindia");

    prompt.focus = 1;
    for c in " | Raisa".chars() {
        prompt.push_char(c);
    }
    submit_prompt(&mut app, &mut store, now());
    let poll = store.poll();
    assert_eq!(poll.options.len(), 5);
    assert_eq!(poll.options[0].votes, 45);
    assert_eq!(poll.options[4].text, "Raisa");
}

#[test]
fn site_editors_save_branding_about_and_home() {
    let mut store = ContentStore::in_memory();
    let mut app = admin_on(AdminSection::News);

    open_prompt(&mut app, &store, PromptKind::EditBranding);
    assert_eq!(app.prompt.as_ref().unwrap().value(0), "ONAIR");
    app.prompt.as_mut().unwrap().fields[0].value = "Radio Kota".to_string();
    submit_prompt(&mut app, &mut store, now());
    assert_eq!(store.branding().site_title, "Radio Kota");
    assert_eq!(store.branding().primary_color, "#FFCD00");

    open_prompt(&mut app, &store, PromptKind::EditAbout);
    app.prompt.as_mut().unwrap().fields[4].value = "+62 21 555 0101".to_string();
    submit_prompt(&mut app, &mut store, now());
    assert_eq!(store.about().contact.phone, "+62 21 555 0101");

    open_prompt(&mut app, &store, PromptKind::EditHome);
    let prompt = app.prompt.as_mut().unwrap();
    prompt.fields[1].value = "EVENING JAM".to_string();
    prompt.fields[4].value.clear();
    submit_prompt(&mut app, &mut store, now());
    assert_eq!(store.home().hero.title, "EVENING JAM");
    assert_eq!(store.home().hero.audio_url, None);
    assert!(app.prompt.is_none());
}

#[test]
fn site_editors_are_admin_only() {
    let mut store = ContentStore::in_memory();
    accounts_login(&mut store, "dinda@example.com");
    let mut app = admin_on(AdminSection::Users);
    for kind in [PromptKind::EditBranding, PromptKind::EditPoll, PromptKind::EditUser] {
        open_prompt(&mut app, &store, kind);
        assert!(app.prompt.is_none());
    }
    admin_add(&mut app, &store);
    assert!(app.prompt.is_none());
}

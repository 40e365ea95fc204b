//! What keys do to content and playback. Every outcome lands on the status
//! line; nothing here returns an error to the event loop.

use chrono::{DateTime, Local};

use crate::accounts::{self, RegisterForm, UserForm};
use crate::audio::{OutputDevice, PlayIntent, PlaybackController, Track};
use crate::content::{
    chart_track, hero_track, live_show_track, podcast_track, ContentStore, NetworkItem, NewsItem,
    PodcastEpisode, Show, UserRole, UserStatus,
};
use crate::interaction::{compose_chat, compose_host_message, revise_poll, SongRequest};

use super::model::{AdminSection, App, Page};
use super::prompt::{Prompt, PromptKind};

/// Number of selectable rows on the current page.
pub fn item_count(app: &App, store: &ContentStore) -> usize {
    match app.page {
        Page::Home => 1,
        Page::Live => store.shows().len(),
        Page::Top40 => store.charts().len(),
        Page::Podcasts => store.podcasts().len(),
        Page::News => store.news().len(),
        Page::Interaction => store.poll().options.len() + app.votes.candidates().len(),
        Page::About => store.about().dna.items.len(),
        Page::Account => 0,
        Page::Admin => admin_len(app.admin_section, store),
    }
}

fn admin_len(section: AdminSection, store: &ContentStore) -> usize {
    match section {
        AdminSection::News => store.news().len(),
        AdminSection::Charts => store.charts().len(),
        AdminSection::Podcasts => store.podcasts().len(),
        AdminSection::Shows => store.shows().len(),
        AdminSection::Networks => store.networks().len(),
        AdminSection::Users => store.users().len(),
        AdminSection::Chat => store.chat().len(),
        AdminSection::Notifications => store.notifications().len(),
    }
}

fn play_track<D: OutputDevice>(app: &mut App, player: &mut PlaybackController<D>, track: Track) {
    let intent = player.play_intent(&track);
    let title = track.title.clone();
    player.play(track);
    match intent {
        PlayIntent::Switch => app.info(format!("Loading {title}")),
        PlayIntent::Toggle => app.info(format!("{} {title}", player.state().transport.label())),
    }
}

/// `Enter` on the current page.
pub fn activate<D: OutputDevice>(
    app: &mut App,
    store: &mut ContentStore,
    player: &mut PlaybackController<D>,
) {
    let sel = app.selected();
    match app.page {
        Page::Home => {
            let track = hero_track(&store.home(), &store.branding());
            play_track(app, player, track);
        }
        // Whatever row is highlighted, the on-air show is the one that streams.
        Page::Live => match store.shows().first() {
            Some(show) => play_track(app, player, live_show_track(show)),
            None => app.error("Nothing on air"),
        },
        Page::Top40 => {
            if let Some(item) = store.charts().get(sel) {
                play_track(app, player, chart_track(&item.song));
            }
        }
        Page::Podcasts => {
            if let Some(episode) = store.podcasts().get(sel) {
                let track = podcast_track(episode, &store.branding());
                play_track(app, player, track);
            }
        }
        Page::Interaction => {
            let poll = store.poll();
            match poll.options.get(sel) {
                Some(option) => match app.ballot.vote(store, &option.id) {
                    Ok(poll) => {
                        let pct = poll
                            .options
                            .iter()
                            .find(|o| o.id == option.id)
                            .map(|o| poll.percent(o))
                            .unwrap_or(0);
                        app.info(format!("Voted \"{}\" ({pct}%)", option.text));
                    }
                    Err(e) => app.error(e.to_string()),
                },
                None => vote_candidate(app, sel - poll.options.len()),
            }
        }
        Page::News | Page::About | Page::Account | Page::Admin => {}
    }
}

fn vote_candidate(app: &mut App, idx: usize) {
    let Some(candidate) = app.votes.candidates().get(idx).cloned() else {
        return;
    };
    match app.votes.vote(&candidate.id) {
        Ok(()) => app.info(format!("Vote counted for {}", candidate.title)),
        Err(e) => app.error(e.to_string()),
    }
}

/// `v`: vote for the highlighted song.
pub fn vote_selected(app: &mut App, store: &ContentStore) {
    let sel = app.selected();
    match app.page {
        Page::Top40 => {
            let Some(item) = store.charts().into_iter().nth(sel) else {
                return;
            };
            match app.votes.vote(&item.song.id) {
                Ok(()) => app.info(format!("Vote counted for {}", item.song.title)),
                Err(e) => app.error(e.to_string()),
            }
        }
        Page::Interaction => {
            if let Some(idx) = sel.checked_sub(store.poll().options.len()) {
                vote_candidate(app, idx);
            }
        }
        _ => {}
    }
}

/// Open the form for `kind`, pre-filled where that makes sense.
pub fn open_prompt(app: &mut App, store: &ContentStore, kind: PromptKind) {
    if kind.admin_only() && !require_admin(app, store) {
        return;
    }
    let prompt = match kind {
        PromptKind::EditProfile => {
            let user = store.current_user();
            Prompt::prefilled(kind, &[&user.name, user.bio.as_deref().unwrap_or("")])
        }
        PromptKind::EditUser => {
            let user = match app.admin_section {
                AdminSection::Users => store.users().into_iter().nth(app.selected()),
                _ => None,
            };
            let Some(user) = user else {
                return;
            };
            let bio = user.bio.as_deref().unwrap_or("");
            Prompt::prefilled(kind, &[&user.name, &user.email, user.role.label(), bio])
                .editing(user.id)
        }
        PromptKind::EditPoll => {
            let poll = store.poll();
            let options: Vec<&str> = poll.options.iter().map(|o| o.text.as_str()).collect();
            Prompt::prefilled(kind, &[&poll.question, &options.join(" | ")])
        }
        PromptKind::EditBranding => {
            let b = store.branding();
            Prompt::prefilled(kind, &[&b.site_title, &b.logo_url, &b.primary_color])
        }
        PromptKind::EditAbout => {
            let about = store.about();
            Prompt::prefilled(
                kind,
                &[
                    &about.hero.subtitle,
                    &about.story.title,
                    &about.contact.address,
                    &about.contact.email,
                    &about.contact.phone,
                ],
            )
        }
        PromptKind::EditHome => {
            let hero = store.home().hero;
            Prompt::prefilled(
                kind,
                &[
                    &hero.tagline,
                    &hero.title,
                    &hero.description,
                    &hero.cta_text,
                    hero.audio_url.as_deref().unwrap_or(""),
                ],
            )
        }
        _ => Prompt::new(kind),
    };
    app.open_prompt(prompt);
}

/// `a` on the admin page: the add form for the current section.
pub fn admin_add(app: &mut App, store: &ContentStore) {
    if app.page != Page::Admin {
        return;
    }
    let kind = match app.admin_section {
        AdminSection::News => PromptKind::AddNews,
        AdminSection::Shows => PromptKind::AddShow,
        AdminSection::Podcasts => PromptKind::AddPodcast,
        AdminSection::Networks => PromptKind::AddNetwork,
        AdminSection::Users => PromptKind::AddUser,
        AdminSection::Chat => PromptKind::HostMessage,
        AdminSection::Charts | AdminSection::Notifications => {
            app.error(format!("Nothing to add to {}", app.admin_section.label()));
            return;
        }
    };
    open_prompt(app, store, kind);
}

/// `u` on the admin users list: edit the highlighted account.
pub fn admin_edit_user(app: &mut App, store: &ContentStore) {
    if app.page == Page::Admin && app.admin_section == AdminSection::Users {
        open_prompt(app, store, PromptKind::EditUser);
    }
}

/// `Enter` on the last field of the open prompt. The prompt stays open when
/// the input is rejected.
pub fn submit_prompt(app: &mut App, store: &mut ContentStore, now: DateTime<Local>) {
    let Some(prompt) = app.prompt.clone() else {
        return;
    };

    let outcome: Result<String, String> = match prompt.kind {
        PromptKind::Chat => {
            let user = store.current_user();
            match compose_chat(&user, prompt.value(0), now) {
                Some(msg) => store
                    .send_chat(msg)
                    .map(|()| String::from("Message sent"))
                    .map_err(|e| e.to_string()),
                None => Err(String::from("Type a message first")),
            }
        }
        PromptKind::Login => accounts::login(store, prompt.value(0), prompt.value(1))
            .map(|u| format!("Welcome back, {}!", u.name))
            .map_err(|e| e.to_string()),
        PromptKind::Register => {
            let form = RegisterForm {
                name: prompt.value(0).to_string(),
                email: prompt.value(1).to_string(),
                password: prompt.value(2).to_string(),
                confirm_password: prompt.value(3).to_string(),
            };
            accounts::register(store, &form, now)
                .map(|u| format!("Welcome to {}, {}!", store.branding().site_title, u.name))
                .map_err(|e| e.to_string())
        }
        PromptKind::EditProfile => {
            accounts::update_profile(store, prompt.value(0), prompt.value(1))
                .map(|_| String::from("Profile updated"))
                .map_err(|e| e.to_string())
        }
        PromptKind::ChangePassword => {
            accounts::change_password(prompt.value(0), prompt.value(1), prompt.value(2))
                .map(|()| String::from("Password changed"))
                .map_err(|e| e.to_string())
        }
        PromptKind::SongRequest => {
            let request = SongRequest {
                artist: prompt.value(0).to_string(),
                title: prompt.value(1).to_string(),
                message: prompt.value(2).to_string(),
            };
            request
                .submit(store, now)
                .map(|n| n.message)
                .map_err(|e| e.to_string())
        }
        PromptKind::AddNews => add_news(store, &prompt, now),
        PromptKind::AddShow => add_show(store, &prompt, now),
        PromptKind::AddPodcast => add_podcast(store, &prompt, now),
        PromptKind::AddNetwork => add_network(store, &prompt, now),
        PromptKind::AddUser | PromptKind::EditUser => {
            let form = UserForm {
                name: prompt.value(0).to_string(),
                email: prompt.value(1).to_string(),
                role: prompt.value(2).to_string(),
                bio: prompt.value(3).to_string(),
            };
            let editing = prompt.target.is_some();
            accounts::save_user(store, prompt.target.as_deref(), &form, now)
                .map(|u| {
                    if editing {
                        format!("Saved {}", u.name)
                    } else {
                        format!("Added {}", u.name)
                    }
                })
                .map_err(|e| e.to_string())
        }
        PromptKind::HostMessage => {
            match compose_host_message(&store.branding().site_title, prompt.value(0), now) {
                Some(msg) => store
                    .send_chat(msg)
                    .map(|()| String::from("Posted as host"))
                    .map_err(|e| e.to_string()),
                None => Err(String::from("Type a message first")),
            }
        }
        PromptKind::EditPoll => {
            let options: Vec<&str> = prompt.value(1).split('|').collect();
            revise_poll(store, prompt.value(0), &options, now)
                .map(|_| String::from("Poll updated"))
                .map_err(|e| e.to_string())
        }
        PromptKind::EditBranding => save_branding(store, &prompt),
        PromptKind::EditAbout => save_about(store, &prompt),
        PromptKind::EditHome => save_home(store, &prompt),
    };

    match outcome {
        Ok(msg) => {
            app.close_prompt();
            app.info(msg);
        }
        Err(msg) => app.error(msg),
    }
}

fn add_news(store: &mut ContentStore, prompt: &Prompt, now: DateTime<Local>) -> Result<String, String> {
    let title = prompt.value(0).trim();
    if title.is_empty() {
        return Err(String::from("title is required"));
    }
    let category = match prompt.value(1).trim() {
        "" => "News",
        c => c,
    };
    let item = NewsItem {
        id: format!("n-{}", now.timestamp_millis()),
        title: title.to_string(),
        category: category.to_string(),
        date: now.format("%b %-d, %Y").to_string(),
        image_url: String::new(),
        excerpt: prompt.value(2).trim().to_string(),
    };
    store.add_news(item).map_err(|e| e.to_string())?;
    Ok(format!("Published \"{title}\""))
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    match value.trim() {
        "" => default,
        v => v,
    }
}

fn optional(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

fn add_show(store: &mut ContentStore, prompt: &Prompt, now: DateTime<Local>) -> Result<String, String> {
    let title = prompt.value(0).trim();
    if title.is_empty() {
        return Err(String::from("title is required"));
    }
    let show = Show {
        id: format!("s-{}", now.timestamp_millis()),
        title: title.to_string(),
        host: prompt.value(1).trim().to_string(),
        time: prompt.value(2).trim().to_string(),
        image_url: String::from("https://picsum.photos/400/400"),
        description: prompt.value(3).trim().to_string(),
    };
    store.add_show(show).map_err(|e| e.to_string())?;
    Ok(format!("Scheduled \"{title}\""))
}

fn add_podcast(store: &mut ContentStore, prompt: &Prompt, now: DateTime<Local>) -> Result<String, String> {
    let title = prompt.value(0).trim();
    if title.is_empty() {
        return Err(String::from("title is required"));
    }
    let episode = PodcastEpisode {
        id: format!("p-{}", now.timestamp_millis()),
        title: title.to_string(),
        date: String::from("Just now"),
        duration: or_default(prompt.value(2), "0 Min").to_string(),
        image_url: String::from("https://picsum.photos/300/300"),
        category: or_default(prompt.value(1), "Lifestyle").to_string(),
        audio_url: optional(prompt.value(3)),
    };
    store.add_podcast(episode).map_err(|e| e.to_string())?;
    Ok(format!("Published \"{title}\""))
}

fn add_network(store: &mut ContentStore, prompt: &Prompt, now: DateTime<Local>) -> Result<String, String> {
    let city = prompt.value(0).trim();
    let freq = prompt.value(1).trim();
    if city.is_empty() || freq.is_empty() {
        return Err(String::from("city and frequency are required"));
    }
    let station = NetworkItem {
        id: format!("net-{}", now.timestamp_millis()),
        city: city.to_string(),
        freq: freq.to_string(),
    };
    store.add_network(station).map_err(|e| e.to_string())?;
    Ok(format!("Added {city} {freq}"))
}

fn save_branding(store: &mut ContentStore, prompt: &Prompt) -> Result<String, String> {
    let site_title = prompt.value(0).trim();
    if site_title.is_empty() {
        return Err(String::from("site title is required"));
    }
    let mut branding = store.branding();
    branding.site_title = site_title.to_string();
    branding.logo_url = prompt.value(1).trim().to_string();
    branding.primary_color = or_default(prompt.value(2), &branding.primary_color).to_string();
    store.update_branding(&branding).map_err(|e| e.to_string())?;
    Ok(String::from("Branding saved"))
}

fn save_about(store: &mut ContentStore, prompt: &Prompt) -> Result<String, String> {
    let mut about = store.about();
    about.hero.subtitle = prompt.value(0).trim().to_string();
    about.story.title = or_default(prompt.value(1), &about.story.title).to_string();
    about.contact.address = prompt.value(2).trim().to_string();
    about.contact.email = prompt.value(3).trim().to_string();
    about.contact.phone = prompt.value(4).trim().to_string();
    store.update_about(&about).map_err(|e| e.to_string())?;
    Ok(String::from("About page saved"))
}

fn save_home(store: &mut ContentStore, prompt: &Prompt) -> Result<String, String> {
    let title = prompt.value(1).trim();
    if title.is_empty() {
        return Err(String::from("title is required"));
    }
    let mut home = store.home();
    home.hero.tagline = prompt.value(0).trim().to_string();
    home.hero.title = title.to_string();
    home.hero.description = prompt.value(2).trim().to_string();
    home.hero.cta_text = or_default(prompt.value(3), &home.hero.cta_text).to_string();
    home.hero.audio_url = optional(prompt.value(4));
    store.update_home(&home).map_err(|e| e.to_string())?;
    Ok(String::from("Front page saved"))
}

fn require_admin(app: &mut App, store: &ContentStore) -> bool {
    if store.current_user().role == UserRole::Admin {
        return true;
    }
    app.error("Admins only");
    false
}

/// `d` on the admin page: delete the highlighted record.
pub fn admin_delete(app: &mut App, store: &mut ContentStore) {
    if app.page != Page::Admin || !require_admin(app, store) {
        return;
    }
    let sel = app.selected();
    let result = match app.admin_section {
        AdminSection::News => delete_nth(store.news(), sel, |n| n.id.clone(), |id| {
            store.delete_news(&id).map(|n| n.title)
        }),
        AdminSection::Charts => {
            let mut charts = store.charts();
            if sel < charts.len() {
                let removed = charts.remove(sel);
                Some(store.replace_chart(charts).map(|()| removed.song.title))
            } else {
                None
            }
        }
        AdminSection::Podcasts => delete_nth(store.podcasts(), sel, |p| p.id.clone(), |id| {
            store.delete_podcast(&id).map(|p| p.title)
        }),
        AdminSection::Shows => delete_nth(store.shows(), sel, |s| s.id.clone(), |id| {
            store.delete_show(&id).map(|s| s.title)
        }),
        AdminSection::Networks => delete_nth(store.networks(), sel, |n| n.id.clone(), |id| {
            store.delete_network(&id).map(|n| n.city)
        }),
        AdminSection::Users => {
            let current = store.current_user();
            match store.users().get(sel) {
                Some(u) if u.id == current.id => {
                    app.error("You cannot delete yourself");
                    return;
                }
                Some(u) => Some(store.delete_user(&u.id).map(|u| u.name)),
                None => None,
            }
        }
        AdminSection::Chat => delete_nth(store.chat(), sel, |m| m.id.clone(), |id| {
            store.delete_chat(&id).map(|m| m.text)
        }),
        AdminSection::Notifications => Some(
            store
                .clear_notifications()
                .map(|()| String::from("all notifications")),
        ),
    };

    match result {
        Some(Ok(label)) => {
            app.clamp_selection(admin_len(app.admin_section, store));
            app.info(format!("Deleted {label}"));
        }
        Some(Err(e)) => app.error(e.to_string()),
        None => {}
    }
}

fn delete_nth<T, E>(
    items: Vec<T>,
    idx: usize,
    id: impl Fn(&T) -> String,
    delete: impl FnOnce(String) -> Result<String, E>,
) -> Option<Result<String, E>> {
    items.get(idx).map(|item| delete(id(item)))
}

/// `b` on the admin users list.
pub fn admin_toggle_ban(app: &mut App, store: &mut ContentStore) {
    if app.page != Page::Admin || app.admin_section != AdminSection::Users {
        return;
    }
    if !require_admin(app, store) {
        return;
    }
    let Some(user) = store.users().into_iter().nth(app.selected()) else {
        return;
    };
    if user.id == store.current_user().id {
        app.error("You cannot ban yourself");
        return;
    }
    let status = if user.is_banned() {
        UserStatus::Active
    } else {
        UserStatus::Banned
    };
    match store.set_user_status(&user.id, status) {
        Ok(()) if status == UserStatus::Banned => app.info(format!("Banned {}", user.name)),
        Ok(()) => app.info(format!("Unbanned {}", user.name)),
        Err(e) => app.error(e.to_string()),
    }
}

/// `m`: mark every notification read.
pub fn mark_notifications_read(app: &mut App, store: &mut ContentStore) {
    match store.mark_all_read() {
        Ok(()) => app.info("All notifications read"),
        Err(e) => app.error(e.to_string()),
    }
}

/// `R` on the admin page. The first press arms, the second resets.
pub fn admin_reset(app: &mut App, store: &mut ContentStore) {
    if app.page != Page::Admin || !require_admin(app, store) {
        return;
    }
    if !app.pending_reset {
        app.pending_reset = true;
        app.info("Press R again to restore all content to defaults");
        return;
    }
    app.pending_reset = false;
    match store.reset() {
        Ok(()) => {
            app.clamp_selection(admin_len(app.admin_section, store));
            log::info!("[Admin] content reset to defaults");
            app.info("All content restored to defaults");
        }
        Err(e) => app.error(e.to_string()),
    }
}

/// `o` on a user row cycles the role: user, moderator, admin.
pub fn admin_cycle_role(app: &mut App, store: &mut ContentStore) {
    if app.page != Page::Admin || app.admin_section != AdminSection::Users {
        return;
    }
    if !require_admin(app, store) {
        return;
    }
    let Some(user) = store.users().into_iter().nth(app.selected()) else {
        return;
    };
    let role = match user.role {
        UserRole::User => UserRole::Moderator,
        UserRole::Moderator => UserRole::Admin,
        UserRole::Admin => UserRole::User,
    };
    match store.set_user_role(&user.id, role) {
        Ok(()) => app.info(format!("{} is now {}", user.name, role.label())),
        Err(e) => app.error(e.to_string()),
    }
}

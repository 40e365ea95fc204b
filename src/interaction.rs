//! Listener interaction: chat, the weekly poll, song votes, song requests,
//! and the simulated chatter that keeps the chat room alive.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::accounts::avatar_url;
use crate::config::ContentSettings;
use crate::content::{
    ChatMessage, ChatRole, ContentStore, Notification, NotificationKind, Poll, PollOption,
    StoreError, User, UserRole,
};

#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("you already voted")]
    AlreadyVoted,
    #[error("unknown option {0:?}")]
    UnknownOption(String),
    #[error("artist and title are required")]
    EmptyRequest,
    #[error("a poll needs a question and at least two options")]
    IncompletePoll,
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn clock(now: &DateTime<Local>) -> String {
    now.format("%-H:%M").to_string()
}

/// Build a chat message from `user`. Blank text yields `None`.
pub fn compose_chat(user: &User, text: &str, now: DateTime<Local>) -> Option<ChatMessage> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let role = match user.role {
        UserRole::Admin => ChatRole::Admin,
        UserRole::Moderator => ChatRole::Host,
        UserRole::User => ChatRole::User,
    };
    let avatar = if user.avatar.is_empty() {
        avatar_url(&user.name)
    } else {
        user.avatar.clone()
    };

    Some(ChatMessage {
        id: format!("msg-{}", now.timestamp_millis()),
        user_id: user.id.clone(),
        user_name: user.name.clone(),
        user_avatar: avatar,
        text: text.to_string(),
        timestamp: clock(&now),
        role,
    })
}

/// A message posted as the station host from the admin desk.
pub fn compose_host_message(site_title: &str, text: &str, now: DateTime<Local>) -> Option<ChatMessage> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let name = format!("{site_title} Host");
    Some(ChatMessage {
        id: format!("msg-{}", now.timestamp_millis()),
        user_id: "host".to_string(),
        user_avatar: avatar_url(&name),
        user_name: name,
        text: text.to_string(),
        timestamp: clock(&now),
        role: ChatRole::Host,
    })
}

/// Rewrite the poll's question and option texts. Votes stay with the option
/// at the same position; options past the old list start at zero.
pub fn revise_poll(
    store: &mut ContentStore,
    question: &str,
    options: &[&str],
    now: DateTime<Local>,
) -> Result<Poll, InteractionError> {
    let question = question.trim();
    let texts: Vec<&str> = options.iter().map(|o| o.trim()).filter(|o| !o.is_empty()).collect();
    if question.is_empty() || texts.len() < 2 {
        return Err(InteractionError::IncompletePoll);
    }

    let old = store.poll();
    let poll = Poll {
        question: question.to_string(),
        options: texts
            .iter()
            .enumerate()
            .map(|(i, text)| match old.options.get(i) {
                Some(o) => PollOption {
                    text: text.to_string(),
                    ..o.clone()
                },
                None => PollOption {
                    id: format!("o-{}-{i}", now.timestamp_millis()),
                    text: text.to_string(),
                    votes: 0,
                },
            })
            .collect(),
    };
    store.update_poll(&poll)?;
    log::info!("[Poll] revised: {} options", poll.options.len());
    Ok(poll)
}

/// One vote per poll question per session. A new question reopens the ballot.
#[derive(Debug, Default)]
pub struct PollBallot {
    question: Option<String>,
    voted: Option<String>,
}

impl PollBallot {
    pub fn new() -> Self {
        Self::default()
    }

    fn sync(&mut self, poll: &Poll) {
        if self.question.as_deref() != Some(poll.question.as_str()) {
            self.question = Some(poll.question.clone());
            self.voted = None;
        }
    }

    pub fn has_voted(&mut self, poll: &Poll) -> bool {
        self.sync(poll);
        self.voted.is_some()
    }

    /// The option this session voted for on the current question.
    pub fn choice(&mut self, poll: &Poll) -> Option<&str> {
        self.sync(poll);
        self.voted.as_deref()
    }

    pub fn vote(&mut self, store: &mut ContentStore, option_id: &str) -> Result<Poll, InteractionError> {
        let poll = store.poll();
        self.sync(&poll);
        if self.voted.is_some() {
            return Err(InteractionError::AlreadyVoted);
        }
        if !poll.options.iter().any(|o| o.id == option_id) {
            return Err(InteractionError::UnknownOption(option_id.to_string()));
        }

        let poll = store.record_poll_vote(option_id)?;
        self.voted = Some(option_id.to_string());
        Ok(poll)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VoteCandidate {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub votes: u64,
}

/// Song votes for this session. Any song id can be voted once; listed
/// candidates also keep a running tally.
#[derive(Debug)]
pub struct VoteBoard {
    candidates: Vec<VoteCandidate>,
    voted: HashSet<String>,
}

impl Default for VoteBoard {
    fn default() -> Self {
        let candidates = [
            ("v1", "Better", "Zayn", 1240),
            ("v2", "Used To Be Young", "Miley Cyrus", 980),
            ("v3", "Single Soon", "Selena Gomez", 850),
            ("v4", "Rush", "Troye Sivan", 720),
        ]
        .into_iter()
        .map(|(id, title, artist, votes)| VoteCandidate {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            votes,
        })
        .collect();
        Self::new(candidates)
    }
}

impl VoteBoard {
    pub fn new(candidates: Vec<VoteCandidate>) -> Self {
        Self {
            candidates,
            voted: HashSet::new(),
        }
    }

    pub fn candidates(&self) -> &[VoteCandidate] {
        &self.candidates
    }

    pub fn has_voted(&self, song_id: &str) -> bool {
        self.voted.contains(song_id)
    }

    pub fn vote(&mut self, song_id: &str) -> Result<(), InteractionError> {
        if !self.voted.insert(song_id.to_string()) {
            return Err(InteractionError::AlreadyVoted);
        }
        if let Some(c) = self.candidates.iter_mut().find(|c| c.id == song_id) {
            c.votes += 1;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SongRequest {
    pub artist: String,
    pub title: String,
    pub message: String,
}

impl SongRequest {
    /// Submit the request; it is acknowledged as a notification.
    pub fn submit(&self, store: &mut ContentStore, now: DateTime<Local>) -> Result<Notification, InteractionError> {
        let artist = self.artist.trim();
        let title = self.title.trim();
        if artist.is_empty() || title.is_empty() {
            return Err(InteractionError::EmptyRequest);
        }

        let mut message = format!("\"{title}\" by {artist} is in the queue.");
        let note = self.message.trim();
        if !note.is_empty() {
            message.push_str(&format!(" Message: {note}"));
        }

        let notification = Notification {
            id: format!("req-{}", now.timestamp_millis()),
            title: "Request sent!".to_string(),
            message,
            time: "Just now".to_string(),
            read: false,
            kind: NotificationKind::Success,
        };
        store.add_notification(notification.clone())?;
        log::info!("[Interaction] song request: {title} by {artist}");
        Ok(notification)
    }
}

const CHATTER_NAMES: &[&str] = &["Citra", "Bagus", "Dewi", "Eko", "Fajar", "Gita", "Hendra"];
const CHATTER_LINES: &[&str] = &[
    "This song is fire!",
    "Greetings from Bandung!",
    "When is Sheila on 7 coming?",
    "The host is hilarious today haha",
    "Play some Coldplay please",
    "Good morning everyone",
    "Traffic on Sudirman is terrible :(",
];

/// Simulated listeners posting into the chat every so often.
pub struct ListenerChatter<R: Rng = StdRng> {
    rng: R,
    interval: Duration,
    chance: f64,
    last: Instant,
}

impl ListenerChatter<StdRng> {
    pub fn from_settings(settings: &ContentSettings, start: Instant) -> Self {
        Self::with_rng(
            StdRng::from_rng(&mut rand::rng()),
            Duration::from_millis(settings.chatter_interval_ms),
            settings.chatter_chance,
            start,
        )
    }
}

impl<R: Rng> ListenerChatter<R> {
    pub fn with_rng(rng: R, interval: Duration, chance: f64, start: Instant) -> Self {
        Self {
            rng,
            interval,
            chance: chance.clamp(0.0, 1.0),
            last: start,
        }
    }

    /// Returns a new listener message when an interval has elapsed and the
    /// roll succeeds.
    pub fn tick(&mut self, now: Instant, wall: DateTime<Local>) -> Option<ChatMessage> {
        if now.duration_since(self.last) < self.interval {
            return None;
        }
        self.last = now;
        if !self.rng.random_bool(self.chance) {
            return None;
        }

        let name = CHATTER_NAMES[self.rng.random_range(0..CHATTER_NAMES.len())];
        let text = CHATTER_LINES[self.rng.random_range(0..CHATTER_LINES.len())];
        let millis = wall.timestamp_millis();
        Some(ChatMessage {
            id: format!("msg-{millis}"),
            user_id: format!("u-{millis}"),
            user_name: name.to_string(),
            user_avatar: format!("https://ui-avatars.com/api/?name={name}&background=random"),
            text: text.to_string(),
            timestamp: clock(&wall),
            role: ChatRole::User,
        })
    }
}

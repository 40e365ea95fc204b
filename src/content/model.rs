//! Records held by the content store.
//!
//! Field names serialize camelCase so a stored collection reads the same as
//! the web front end's JSON payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub cover_url: String,
    /// Display label such as `"3:04"`, or `"Live"` for a stream.
    pub duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

impl Song {
    pub fn is_live(&self) -> bool {
        self.duration == "Live"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: String,
    pub title: String,
    pub host: String,
    /// Schedule slot, e.g. `"06:00 - 10:00"`.
    pub time: String,
    pub image_url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastEpisode {
    pub id: String,
    pub title: String,
    pub date: String,
    pub duration: String,
    pub image_url: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub category: String,
    pub date: String,
    pub image_url: String,
    pub excerpt: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Same,
    New,
}

impl Trend {
    pub fn label(self) -> &'static str {
        match self {
            Trend::Up => "UP",
            Trend::Down => "DOWN",
            Trend::Same => "SAME",
            Trend::New => "NEW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartItem {
    /// 1-based; renumbered by the store on every chart replacement.
    pub rank: u32,
    pub song: Song,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    pub votes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub question: String,
    pub options: Vec<PollOption>,
}

impl Poll {
    pub fn total_votes(&self) -> u64 {
        self.options.iter().map(|o| o.votes).sum()
    }

    /// Share of all votes for `option`, rounded to a whole percent.
    pub fn percent(&self, option: &PollOption) -> u64 {
        let total = self.total_votes();
        if total == 0 {
            return 0;
        }
        ((option.votes as f64 / total as f64) * 100.0).round() as u64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkItem {
    pub id: String,
    pub city: String,
    pub freq: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    pub site_title: String,
    pub logo_url: String,
    pub primary_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutHero {
    pub title_line1: String,
    pub title_line2: String,
    pub highlight_word: String,
    pub subtitle: String,
    pub bg_image: String,
    pub since_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutStory {
    pub title: String,
    pub highlight_word: String,
    pub description1: String,
    pub description2: String,
    pub image: String,
    pub stat1_value: String,
    pub stat1_label: String,
    pub stat2_value: String,
    pub stat2_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaItem {
    pub id: String,
    pub title: String,
    pub desc: String,
    /// Icon name, e.g. `"Music"`.
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutDna {
    pub title: String,
    pub highlight_word: String,
    pub subtitle: String,
    pub items: Vec<DnaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub address: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboutPage {
    pub hero: AboutHero,
    pub story: AboutStory,
    pub dna: AboutDna,
    pub contact: Contact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeHero {
    pub tagline: String,
    pub title: String,
    pub description: String,
    pub bg_image: String,
    pub cta_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomePage {
    pub hero: HomeHero,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Admin,
    Host,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub text: String,
    /// Wall-clock `H:MM`.
    pub timestamp: String,
    pub role: ChatRole,
}

impl ChatMessage {
    pub fn is_staff(&self) -> bool {
        matches!(self.role, ChatRole::Admin | ChatRole::Host)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Moderator,
    User,
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Moderator => "moderator",
            UserRole::User => "user",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Banned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    /// `YYYY-MM-DD`.
    pub joined_date: String,
}

impl User {
    pub fn is_banned(&self) -> bool {
        self.status == UserStatus::Banned
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    /// Relative time label, e.g. `"Just now"`.
    pub time: String,
    pub read: bool,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

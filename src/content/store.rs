use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::defaults;
use super::model::*;

/// Every key the store knows about. The string form is the persisted key.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContentKey {
    News,
    Charts,
    Podcasts,
    Shows,
    Poll,
    Networks,
    Branding,
    About,
    Home,
    Notifications,
    Chat,
    CurrentUser,
    AllUsers,
}

impl ContentKey {
    pub const ALL: [ContentKey; 13] = [
        ContentKey::News,
        ContentKey::Charts,
        ContentKey::Podcasts,
        ContentKey::Shows,
        ContentKey::Poll,
        ContentKey::Networks,
        ContentKey::Branding,
        ContentKey::About,
        ContentKey::Home,
        ContentKey::Notifications,
        ContentKey::Chat,
        ContentKey::CurrentUser,
        ContentKey::AllUsers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ContentKey::News => "onair_news",
            ContentKey::Charts => "onair_charts",
            ContentKey::Podcasts => "onair_podcasts",
            ContentKey::Shows => "onair_shows",
            ContentKey::Poll => "onair_poll",
            ContentKey::Networks => "onair_networks",
            ContentKey::Branding => "onair_branding",
            ContentKey::About => "onair_about",
            ContentKey::Home => "onair_home",
            ContentKey::Notifications => "onair_notifications",
            ContentKey::Chat => "onair_chat",
            ContentKey::CurrentUser => "onair_user",
            ContentKey::AllUsers => "onair_all_users",
        }
    }
}

/// Sent to subscribers after every successful write.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub key: ContentKey,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{key} already has an item with id {id:?}")]
    DuplicateId { key: &'static str, id: String },
    #[error("{key} has no item with id {id:?}")]
    NotFound { key: &'static str, id: String },
    #[error("song {0:?} appears more than once in the chart")]
    DuplicateChartSong(String),
}

/// A record kept in an id-keyed collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    const KEY: ContentKey;

    fn record_id(&self) -> &str;

    fn defaults() -> Vec<Self>;
}

macro_rules! record {
    ($ty:ty, $key:expr, $defaults:path, |$it:ident| $id:expr) => {
        impl Record for $ty {
            const KEY: ContentKey = $key;

            fn record_id(&self) -> &str {
                let $it = self;
                $id
            }

            fn defaults() -> Vec<Self> {
                $defaults()
            }
        }
    };
}

record!(NewsItem, ContentKey::News, defaults::news, |n| &n.id);
record!(ChartItem, ContentKey::Charts, defaults::charts, |c| &c.song.id);
record!(PodcastEpisode, ContentKey::Podcasts, defaults::podcasts, |p| &p.id);
record!(Show, ContentKey::Shows, defaults::shows, |s| &s.id);
record!(NetworkItem, ContentKey::Networks, defaults::networks, |n| &n.id);
record!(Notification, ContentKey::Notifications, defaults::notifications, |n| &n.id);
record!(ChatMessage, ContentKey::Chat, defaults::chat, |m| &m.id);
record!(User, ContentKey::AllUsers, defaults::users, |u| &u.id);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum At {
    Front,
    Back,
}

/// Flat key/value content store, persisted as one JSON object of
/// key -> JSON text.
///
/// Reads never fail: a missing key or a value that no longer parses yields
/// the built-in default for that key.
pub struct ContentStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
    subscribers: Vec<Sender<ContentChange>>,
}

impl ContentStore {
    /// Open the store backed by `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|source| StoreError::Json {
                context: path.display().to_string(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        log::debug!("[Store] opened {:?} with {} keys", path, entries.len());

        Ok(Self {
            path: Some(path),
            entries,
            subscribers: Vec::new(),
        })
    }

    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
            subscribers: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn subscribe(&mut self) -> Receiver<ContentChange> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Restore every key to its built-in default.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.persist(&BTreeMap::new())?;
        self.entries.clear();
        log::info!("[Store] reset to defaults");
        for key in ContentKey::ALL {
            self.notify(key);
        }
        Ok(())
    }

    // --- news ---

    pub fn news(&self) -> Vec<NewsItem> {
        self.list()
    }

    pub fn add_news(&mut self, item: NewsItem) -> Result<(), StoreError> {
        self.insert(item, At::Front)
    }

    pub fn delete_news(&mut self, id: &str) -> Result<NewsItem, StoreError> {
        self.remove(id)
    }

    // --- charts ---

    pub fn charts(&self) -> Vec<ChartItem> {
        self.list()
    }

    /// Replace the whole chart, renumbering ranks `1..=n` in list order.
    pub fn replace_chart(&mut self, items: Vec<ChartItem>) -> Result<(), StoreError> {
        let mut seen = std::collections::HashSet::new();
        for item in &items {
            if !seen.insert(item.song.id.as_str()) {
                return Err(StoreError::DuplicateChartSong(item.song.id.clone()));
            }
        }

        let items: Vec<ChartItem> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| ChartItem {
                rank: i as u32 + 1,
                ..item
            })
            .collect();
        self.write(ContentKey::Charts, &items)
    }

    // --- podcasts ---

    pub fn podcasts(&self) -> Vec<PodcastEpisode> {
        self.list()
    }

    pub fn add_podcast(&mut self, item: PodcastEpisode) -> Result<(), StoreError> {
        self.insert(item, At::Front)
    }

    pub fn delete_podcast(&mut self, id: &str) -> Result<PodcastEpisode, StoreError> {
        self.remove(id)
    }

    // --- shows ---

    pub fn shows(&self) -> Vec<Show> {
        self.list()
    }

    pub fn add_show(&mut self, item: Show) -> Result<(), StoreError> {
        self.insert(item, At::Back)
    }

    pub fn delete_show(&mut self, id: &str) -> Result<Show, StoreError> {
        self.remove(id)
    }

    // --- poll ---

    pub fn poll(&self) -> Poll {
        self.read(ContentKey::Poll, defaults::poll)
    }

    pub fn update_poll(&mut self, poll: &Poll) -> Result<(), StoreError> {
        self.write(ContentKey::Poll, poll)
    }

    /// Add one vote to `option_id` and return the updated poll.
    pub fn record_poll_vote(&mut self, option_id: &str) -> Result<Poll, StoreError> {
        let mut poll = self.poll();
        let option = poll
            .options
            .iter_mut()
            .find(|o| o.id == option_id)
            .ok_or_else(|| StoreError::NotFound {
                key: ContentKey::Poll.as_str(),
                id: option_id.to_string(),
            })?;
        option.votes += 1;
        self.write(ContentKey::Poll, &poll)?;
        Ok(poll)
    }

    // --- networks ---

    pub fn networks(&self) -> Vec<NetworkItem> {
        self.list()
    }

    pub fn add_network(&mut self, item: NetworkItem) -> Result<(), StoreError> {
        self.insert(item, At::Back)
    }

    pub fn delete_network(&mut self, id: &str) -> Result<NetworkItem, StoreError> {
        self.remove(id)
    }

    // --- singletons ---

    pub fn branding(&self) -> Branding {
        self.read(ContentKey::Branding, defaults::branding)
    }

    pub fn update_branding(&mut self, branding: &Branding) -> Result<(), StoreError> {
        self.write(ContentKey::Branding, branding)
    }

    pub fn about(&self) -> AboutPage {
        self.read(ContentKey::About, defaults::about)
    }

    pub fn update_about(&mut self, about: &AboutPage) -> Result<(), StoreError> {
        self.write(ContentKey::About, about)
    }

    pub fn home(&self) -> HomePage {
        self.read(ContentKey::Home, defaults::home)
    }

    pub fn update_home(&mut self, home: &HomePage) -> Result<(), StoreError> {
        self.write(ContentKey::Home, home)
    }

    // --- notifications ---

    pub fn notifications(&self) -> Vec<Notification> {
        self.list()
    }

    pub fn add_notification(&mut self, item: Notification) -> Result<(), StoreError> {
        self.insert(item, At::Front)
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications().iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) -> Result<(), StoreError> {
        let items: Vec<Notification> = self
            .notifications()
            .into_iter()
            .map(|n| Notification { read: true, ..n })
            .collect();
        self.write(ContentKey::Notifications, &items)
    }

    pub fn clear_notifications(&mut self) -> Result<(), StoreError> {
        self.write::<Vec<Notification>>(ContentKey::Notifications, &Vec::new())
    }

    // --- chat ---

    pub fn chat(&self) -> Vec<ChatMessage> {
        self.list()
    }

    pub fn send_chat(&mut self, message: ChatMessage) -> Result<(), StoreError> {
        self.insert(message, At::Back)
    }

    pub fn delete_chat(&mut self, id: &str) -> Result<ChatMessage, StoreError> {
        self.remove(id)
    }

    // --- users ---

    pub fn current_user(&self) -> User {
        self.read(ContentKey::CurrentUser, defaults::current_user)
    }

    pub fn set_current_user(&mut self, user: &User) -> Result<(), StoreError> {
        self.write(ContentKey::CurrentUser, user)
    }

    pub fn users(&self) -> Vec<User> {
        self.list()
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let email = email.trim();
        self.users()
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn add_user(&mut self, user: User) -> Result<(), StoreError> {
        self.insert(user, At::Front)
    }

    /// Replace the stored user with the same id.
    pub fn edit_user(&mut self, user: User) -> Result<(), StoreError> {
        let id = user.id.clone();
        self.update(&id, |u: &mut User| *u = user)
    }

    pub fn set_user_role(&mut self, id: &str, role: UserRole) -> Result<(), StoreError> {
        self.update(id, |u: &mut User| u.role = role)
    }

    pub fn set_user_status(&mut self, id: &str, status: UserStatus) -> Result<(), StoreError> {
        self.update(id, |u: &mut User| u.status = status)
    }

    pub fn delete_user(&mut self, id: &str) -> Result<User, StoreError> {
        self.remove(id)
    }

    // --- plumbing ---

    fn read<T: DeserializeOwned>(&self, key: ContentKey, default: impl FnOnce() -> T) -> T {
        let Some(text) = self.entries.get(key.as_str()) else {
            return default();
        };
        match serde_json::from_str(text) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("[Store] {} is unreadable, using defaults: {e}", key.as_str());
                default()
            }
        }
    }

    fn list<T: Record>(&self) -> Vec<T> {
        self.read(T::KEY, T::defaults)
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: ContentKey, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string(value).map_err(|source| StoreError::Json {
            context: key.as_str().to_string(),
            source,
        })?;
        let mut entries = self.entries.clone();
        entries.insert(key.as_str().to_string(), text);
        // Memory only changes once the file has it.
        self.persist(&entries)?;
        self.entries = entries;
        self.notify(key);
        Ok(())
    }

    fn insert<T: Record>(&mut self, item: T, at: At) -> Result<(), StoreError> {
        let mut items: Vec<T> = self.list();
        if items.iter().any(|i| i.record_id() == item.record_id()) {
            return Err(StoreError::DuplicateId {
                key: T::KEY.as_str(),
                id: item.record_id().to_string(),
            });
        }
        match at {
            At::Front => items.insert(0, item),
            At::Back => items.push(item),
        }
        self.write(T::KEY, &items)
    }

    fn remove<T: Record>(&mut self, id: &str) -> Result<T, StoreError> {
        let mut items: Vec<T> = self.list();
        let pos = items
            .iter()
            .position(|i| i.record_id() == id)
            .ok_or_else(|| StoreError::NotFound {
                key: T::KEY.as_str(),
                id: id.to_string(),
            })?;
        let removed = items.remove(pos);
        self.write(T::KEY, &items)?;
        Ok(removed)
    }

    fn update<T: Record>(&mut self, id: &str, f: impl FnOnce(&mut T)) -> Result<(), StoreError> {
        let mut items: Vec<T> = self.list();
        let item = items
            .iter_mut()
            .find(|i| i.record_id() == id)
            .ok_or_else(|| StoreError::NotFound {
                key: T::KEY.as_str(),
                id: id.to_string(),
            })?;
        f(item);
        self.write(T::KEY, &items)
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Json {
            context: path.display().to_string(),
            source,
        })?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        Ok(())
    }

    fn notify(&mut self, key: ContentKey) {
        self.subscribers
            .retain(|tx| tx.send(ContentChange { key }).is_ok());
    }
}

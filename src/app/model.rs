//! Application model: pages, per-page cursors, the open prompt and the
//! status line.
//!
//! Content lives in the store and playback in the controller; `App` only
//! holds what the shell itself needs between frames.

use crate::interaction::{PollBallot, VoteBoard};

use super::prompt::Prompt;

/// Sidebar pages, in sidebar order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Live,
    Top40,
    Podcasts,
    News,
    Interaction,
    About,
    Account,
    Admin,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::Home,
        Page::Live,
        Page::Top40,
        Page::Podcasts,
        Page::News,
        Page::Interaction,
        Page::About,
        Page::Account,
        Page::Admin,
    ];

    pub fn index(self) -> usize {
        Page::ALL.iter().position(|&p| p == self).unwrap_or(0)
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Live => "Live",
            Page::Top40 => "Top 40",
            Page::Podcasts => "Podcasts",
            Page::News => "News",
            Page::Interaction => "Interaction",
            Page::About => "About",
            Page::Account => "Account",
            Page::Admin => "Admin",
        }
    }

    pub fn next(self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    pub fn prev(self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Collections the admin page can manage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdminSection {
    News,
    Charts,
    Podcasts,
    Shows,
    Networks,
    Users,
    Chat,
    Notifications,
}

impl AdminSection {
    const ORDER: [AdminSection; 8] = [
        AdminSection::News,
        AdminSection::Charts,
        AdminSection::Podcasts,
        AdminSection::Shows,
        AdminSection::Networks,
        AdminSection::Users,
        AdminSection::Chat,
        AdminSection::Notifications,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdminSection::News => "news",
            AdminSection::Charts => "charts",
            AdminSection::Podcasts => "podcasts",
            AdminSection::Shows => "shows",
            AdminSection::Networks => "networks",
            AdminSection::Users => "users",
            AdminSection::Chat => "chat",
            AdminSection::Notifications => "notifications",
        }
    }

    pub fn next(self) -> AdminSection {
        let i = Self::ORDER.iter().position(|&s| s == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

/// The main application model.
pub struct App {
    pub page: Page,
    cursors: [usize; Page::ALL.len()],
    pub admin_section: AdminSection,
    pub prompt: Option<Prompt>,
    pub status: Option<Status>,
    /// Set by the first `R` on the admin page; a second `R` confirms.
    pub pending_reset: bool,
    pub ballot: PollBallot,
    pub votes: VoteBoard,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            page: Page::Home,
            cursors: [0; Page::ALL.len()],
            admin_section: AdminSection::News,
            prompt: None,
            status: None,
            pending_reset: false,
            ballot: PollBallot::new(),
            votes: VoteBoard::default(),
        }
    }

    pub fn set_page(&mut self, page: Page) {
        self.page = page;
        self.pending_reset = false;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page.next());
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.prev());
    }

    /// Jump to the page at 1-based sidebar position `n`.
    pub fn goto_page(&mut self, n: usize) {
        if let Some(&page) = n.checked_sub(1).and_then(|i| Page::ALL.get(i)) {
            self.set_page(page);
        }
    }

    /// Cursor position on the current page.
    pub fn selected(&self) -> usize {
        self.cursors[self.page.index()]
    }

    fn cursor_mut(&mut self) -> &mut usize {
        &mut self.cursors[self.page.index()]
    }

    /// Move down, wrapping to the top.
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let cur = self.cursor_mut();
        *cur = (*cur + 1) % len;
    }

    /// Move up, wrapping to the bottom.
    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let cur = self.cursor_mut();
        *cur = if *cur == 0 || *cur >= len { len - 1 } else { *cur - 1 };
    }

    pub fn select_first(&mut self) {
        *self.cursor_mut() = 0;
    }

    pub fn select_last(&mut self, len: usize) {
        *self.cursor_mut() = len.saturating_sub(1);
    }

    /// Keep the cursor inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, len: usize) {
        let cur = self.cursor_mut();
        if *cur >= len {
            *cur = len.saturating_sub(1);
        }
    }

    pub fn cycle_admin_section(&mut self) {
        self.admin_section = self.admin_section.next();
        self.cursors[Page::Admin.index()] = 0;
        self.pending_reset = false;
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn close_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            kind: StatusKind::Info,
            text: text.into(),
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!("[App] {text}");
        self.status = Some(Status {
            kind: StatusKind::Error,
            text,
        });
    }
}

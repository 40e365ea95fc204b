//! Modal text forms: chat input, login, registration and the rest.

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PromptKind {
    Chat,
    Login,
    Register,
    EditProfile,
    ChangePassword,
    SongRequest,
    AddNews,
    AddShow,
    AddPodcast,
    AddNetwork,
    AddUser,
    EditUser,
    HostMessage,
    EditPoll,
    EditBranding,
    EditAbout,
    EditHome,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Chat => " send a message ",
            PromptKind::Login => " log in ",
            PromptKind::Register => " register ",
            PromptKind::EditProfile => " edit profile ",
            PromptKind::ChangePassword => " change password ",
            PromptKind::SongRequest => " request a song ",
            PromptKind::AddNews => " add news ",
            PromptKind::AddShow => " add show ",
            PromptKind::AddPodcast => " add podcast ",
            PromptKind::AddNetwork => " add network station ",
            PromptKind::AddUser => " add user ",
            PromptKind::EditUser => " edit user ",
            PromptKind::HostMessage => " message as host ",
            PromptKind::EditPoll => " edit poll ",
            PromptKind::EditBranding => " edit branding ",
            PromptKind::EditAbout => " edit about page ",
            PromptKind::EditHome => " edit front page ",
        }
    }

    /// Forms only an admin may open.
    pub fn admin_only(self) -> bool {
        !matches!(
            self,
            PromptKind::Chat
                | PromptKind::Login
                | PromptKind::Register
                | PromptKind::EditProfile
                | PromptKind::ChangePassword
                | PromptKind::SongRequest
        )
    }

    fn fields(self) -> &'static [(&'static str, bool)] {
        match self {
            PromptKind::Chat => &[("Message", false)],
            PromptKind::Login => &[("Email", false), ("Password", true)],
            PromptKind::Register => &[
                ("Full name", false),
                ("Email", false),
                ("Password", true),
                ("Confirm password", true),
            ],
            PromptKind::EditProfile => &[("Name", false), ("Bio", false)],
            PromptKind::ChangePassword => &[
                ("Current password", true),
                ("New password", true),
                ("Confirm new password", true),
            ],
            PromptKind::SongRequest => &[
                ("Artist", false),
                ("Title", false),
                ("Message (optional)", false),
            ],
            PromptKind::AddNews => &[("Title", false), ("Category", false), ("Excerpt", false)],
            PromptKind::AddShow => &[
                ("Title", false),
                ("Host", false),
                ("Time slot", false),
                ("Description", false),
            ],
            PromptKind::AddPodcast => &[
                ("Title", false),
                ("Category", false),
                ("Duration", false),
                ("Audio file (optional)", false),
            ],
            PromptKind::AddNetwork => &[("City", false), ("Frequency", false)],
            PromptKind::AddUser | PromptKind::EditUser => &[
                ("Name", false),
                ("Email", false),
                ("Role (user/moderator/admin)", false),
                ("Bio", false),
            ],
            PromptKind::HostMessage => &[("Message", false)],
            PromptKind::EditPoll => &[("Question", false), ("Options (a | b | c)", false)],
            PromptKind::EditBranding => &[
                ("Site title", false),
                ("Logo URL", false),
                ("Primary color", false),
            ],
            PromptKind::EditAbout => &[
                ("Hero subtitle", false),
                ("Story title", false),
                ("Address", false),
                ("Email", false),
                ("Phone", false),
            ],
            PromptKind::EditHome => &[
                ("Tagline", false),
                ("Title", false),
                ("Description", false),
                ("Button text", false),
                ("Audio file (optional)", false),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PromptField {
    pub label: &'static str,
    pub value: String,
    /// Rendered masked.
    pub secret: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub fields: Vec<PromptField>,
    pub focus: usize,
    /// Id of the record being edited, for forms that edit one.
    pub target: Option<String>,
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        let fields = kind
            .fields()
            .iter()
            .map(|&(label, secret)| PromptField {
                label,
                value: String::new(),
                secret,
            })
            .collect();
        Self {
            kind,
            fields,
            focus: 0,
            target: None,
        }
    }

    /// Start with `values` filled into the fields in order.
    pub fn prefilled(kind: PromptKind, values: &[&str]) -> Self {
        let mut prompt = Self::new(kind);
        for (field, value) in prompt.fields.iter_mut().zip(values) {
            field.value = value.to_string();
        }
        prompt
    }

    pub fn editing(mut self, id: impl Into<String>) -> Self {
        self.target = Some(id.into());
        self
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(f) = self.fields.get_mut(self.focus) {
            f.value.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(f) = self.fields.get_mut(self.focus) {
            f.value.pop();
        }
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len().max(1);
    }

    pub fn prev_field(&mut self) {
        let n = self.fields.len().max(1);
        self.focus = (self.focus + n - 1) % n;
    }

    pub fn on_last_field(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }

    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.as_str()).unwrap_or("")
    }
}

//! Mock account flows over the content store.
//!
//! Nothing here is real authentication: passwords are validated for shape
//! and then dropped. Login is an email lookup.

use chrono::{DateTime, Local};

use crate::content::{ContentKey, ContentStore, StoreError, User, UserRole, UserStatus};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("no account found for that email")]
    UnknownEmail,
    #[error("this account has been suspended, contact an admin")]
    Banned,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("{0} is already registered")]
    EmailTaken(String),
    #[error("unknown role {0:?}, use user, moderator or admin")]
    UnknownRole(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn required(value: &str, field: &'static str) -> Result<(), AccountError> {
    if value.trim().is_empty() {
        Err(AccountError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Generated avatar for `name`.
pub fn avatar_url(name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=FFCD00&color=000",
        urlencoding::encode(name)
    )
}

/// Log in as the user registered under `email` (case-insensitive).
pub fn login(store: &mut ContentStore, email: &str, password: &str) -> Result<User, AccountError> {
    required(email, "email")?;
    required(password, "password")?;

    let user = store
        .find_user_by_email(email)
        .ok_or(AccountError::UnknownEmail)?;
    if user.is_banned() {
        log::info!("[Accounts] rejected login for banned user {}", user.id);
        return Err(AccountError::Banned);
    }

    store.set_current_user(&user)?;
    log::info!("[Accounts] logged in as {}", user.id);
    Ok(user)
}

/// Create a new listener account and log in as it.
pub fn register(
    store: &mut ContentStore,
    form: &RegisterForm,
    now: DateTime<Local>,
) -> Result<User, AccountError> {
    required(&form.name, "name")?;
    required(&form.email, "email")?;
    required(&form.password, "password")?;
    if form.password != form.confirm_password {
        return Err(AccountError::PasswordMismatch);
    }

    let email = form.email.trim();
    if store.find_user_by_email(email).is_some() {
        return Err(AccountError::EmailTaken(email.to_string()));
    }

    let name = form.name.trim();
    let user = User {
        id: format!("u-{}", now.timestamp_millis()),
        name: name.to_string(),
        email: email.to_string(),
        avatar: avatar_url(name),
        bio: Some("New member!".to_string()),
        role: UserRole::User,
        status: UserStatus::Active,
        joined_date: now.format("%Y-%m-%d").to_string(),
    };

    store.add_user(user.clone())?;
    store.set_current_user(&user)?;
    log::info!("[Accounts] registered {}", user.id);
    Ok(user)
}

/// Fields an admin can set on any account.
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    /// `user`, `moderator` or `admin`; blank means `user`.
    pub role: String,
    pub bio: String,
}

fn parse_role(role: &str) -> Result<UserRole, AccountError> {
    match role.trim().to_ascii_lowercase().as_str() {
        "" | "user" => Ok(UserRole::User),
        "moderator" | "mod" => Ok(UserRole::Moderator),
        "admin" => Ok(UserRole::Admin),
        other => Err(AccountError::UnknownRole(other.to_string())),
    }
}

/// Create an account (`id` is `None`) or edit the account with `id`.
///
/// Editing keeps id, status, avatar and join date. When the edited account
/// is the signed-in one, the session copy is refreshed too.
pub fn save_user(
    store: &mut ContentStore,
    id: Option<&str>,
    form: &UserForm,
    now: DateTime<Local>,
) -> Result<User, AccountError> {
    required(&form.name, "name")?;
    required(&form.email, "email")?;
    let role = parse_role(&form.role)?;

    let email = form.email.trim();
    if let Some(other) = store.find_user_by_email(email) {
        if Some(other.id.as_str()) != id {
            return Err(AccountError::EmailTaken(email.to_string()));
        }
    }
    let name = form.name.trim().to_string();
    let bio = Some(form.bio.trim().to_string()).filter(|b| !b.is_empty());

    let Some(id) = id else {
        let user = User {
            id: format!("u-{}", now.timestamp_millis()),
            avatar: avatar_url(&name),
            name,
            email: email.to_string(),
            bio,
            role,
            status: UserStatus::Active,
            joined_date: now.format("%Y-%m-%d").to_string(),
        };
        store.add_user(user.clone())?;
        log::info!("[Accounts] admin created {}", user.id);
        return Ok(user);
    };

    let existing = store
        .users()
        .into_iter()
        .find(|u| u.id == id)
        .ok_or_else(|| StoreError::NotFound {
            key: ContentKey::AllUsers.as_str(),
            id: id.to_string(),
        })?;
    let user = User {
        name,
        email: email.to_string(),
        bio,
        role,
        ..existing
    };
    store.edit_user(user.clone())?;
    if store.current_user().id == user.id {
        store.set_current_user(&user)?;
    }
    log::info!("[Accounts] admin edited {}", user.id);
    Ok(user)
}

/// Update the logged-in user's name and bio, mirrored into the user list.
pub fn update_profile(store: &mut ContentStore, name: &str, bio: &str) -> Result<User, AccountError> {
    required(name, "name")?;

    let mut user = store.current_user();
    user.name = name.trim().to_string();
    user.bio = Some(bio.trim().to_string()).filter(|b| !b.is_empty());

    store.set_current_user(&user)?;
    match store.edit_user(user.clone()) {
        Ok(()) | Err(StoreError::NotFound { .. }) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(user)
}

/// Validate a password change. Nothing is stored.
pub fn change_password(current: &str, new: &str, confirm: &str) -> Result<(), AccountError> {
    required(current, "current password")?;
    required(new, "new password")?;
    if new != confirm {
        return Err(AccountError::PasswordMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests;

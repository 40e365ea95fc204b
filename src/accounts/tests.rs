use chrono::TimeZone;

use super::*;

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 3, 9, 10, 5, 0).unwrap()
}

fn form(name: &str, email: &str, pw: &str, confirm: &str) -> RegisterForm {
    RegisterForm {
        name: name.to_string(),
        email: email.to_string(),
        password: pw.to_string(),
        confirm_password: confirm.to_string(),
    }
}

#[test]
fn login_is_case_insensitive_and_sets_current_user() {
    let mut store = ContentStore::in_memory();
    let user = login(&mut store, "  Dinda@Example.com ", "whatever").unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(store.current_user().id, "u-1");
}

#[test]
fn login_requires_both_fields() {
    let mut store = ContentStore::in_memory();
    assert!(matches!(
        login(&mut store, "", "pw"),
        Err(AccountError::MissingField("email"))
    ));
    assert!(matches!(
        login(&mut store, "dinda@example.com", " "),
        Err(AccountError::MissingField("password"))
    ));
}

#[test]
fn login_rejects_unknown_and_banned() {
    let mut store = ContentStore::in_memory();
    assert!(matches!(
        login(&mut store, "ghost@example.com", "pw"),
        Err(AccountError::UnknownEmail)
    ));
    assert!(matches!(
        login(&mut store, "spam@bot.com", "pw"),
        Err(AccountError::Banned)
    ));
    assert_eq!(store.current_user().id, "u-current");
}

#[test]
fn register_creates_and_logs_in() {
    let mut store = ContentStore::in_memory();
    let user = register(&mut store, &form("Sari Dewi", "sari@example.com", "pw", "pw"), now()).unwrap();

    assert_eq!(user.id, format!("u-{}", now().timestamp_millis()));
    assert_eq!(user.joined_date, "2024-03-09");
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.status, UserStatus::Active);
    assert!(user.avatar.contains("name=Sari%20Dewi"));

    assert_eq!(store.users()[0].id, user.id);
    assert_eq!(store.current_user(), user);
}

#[test]
fn register_validates_form() {
    let mut store = ContentStore::in_memory();
    assert!(matches!(
        register(&mut store, &form("", "a@b.c", "pw", "pw"), now()),
        Err(AccountError::MissingField("name"))
    ));
    assert!(matches!(
        register(&mut store, &form("A", "a@b.c", "pw", "px"), now()),
        Err(AccountError::PasswordMismatch)
    ));
    assert!(matches!(
        register(&mut store, &form("A", "DINDA@example.com", "pw", "pw"), now()),
        Err(AccountError::EmailTaken(_))
    ));
    assert_eq!(store.users().len(), 5);
}

#[test]
fn update_profile_mirrors_into_user_list() {
    let mut store = ContentStore::in_memory();
    login(&mut store, "ryo@onair.fm", "pw").unwrap();

    let user = update_profile(&mut store, "Ryo W.", "  ").unwrap();
    assert_eq!(user.name, "Ryo W.");
    assert!(user.bio.is_none());
    assert_eq!(store.current_user().name, "Ryo W.");
    assert_eq!(
        store.users().iter().find(|u| u.id == "u-3").unwrap().name,
        "Ryo W."
    );

    assert!(matches!(
        update_profile(&mut store, "", "bio"),
        Err(AccountError::MissingField("name"))
    ));
}

#[test]
fn change_password_only_validates() {
    assert!(change_password("old", "new", "new").is_ok());
    assert!(matches!(
        change_password("old", "new", "nope"),
        Err(AccountError::PasswordMismatch)
    ));
    assert!(matches!(
        change_password("", "new", "new"),
        Err(AccountError::MissingField(_))
    ));
}

fn user_form(name: &str, email: &str, role: &str) -> UserForm {
    UserForm {
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        bio: String::new(),
    }
}

#[test]
fn admin_creates_active_account_without_switching_session() {
    let mut store = ContentStore::in_memory();
    let user = save_user(&mut store, None, &user_form("Maya", "maya@onair.fm", "Moderator"), now())
        .unwrap();

    assert_eq!(user.id, format!("u-{}", now().timestamp_millis()));
    assert_eq!(user.role, UserRole::Moderator);
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.joined_date, "2024-03-09");
    assert!(user.avatar.contains("Maya"));
    assert_eq!(store.users()[0].id, user.id);
    assert_eq!(store.current_user().id, "u-current");
}

#[test]
fn admin_edit_keeps_identity_and_refreshes_session() {
    let mut store = ContentStore::in_memory();
    let mut form = user_form("Budi S.", "budi@onair.fm", "admin");
    form.bio = "Producer".to_string();

    let edited = save_user(&mut store, Some("u-2"), &form, now()).unwrap();
    assert_eq!(edited.joined_date, "2023-06-10");
    assert_eq!(edited.role, UserRole::Admin);
    assert_eq!(edited.bio.as_deref(), Some("Producer"));
    assert_eq!(store.users()[2], edited);

    save_user(&mut store, Some("u-current"), &user_form("Station", "member@onair.fm", "admin"), now())
        .unwrap();
    assert_eq!(store.current_user().name, "Station");
}

#[test]
fn save_user_rejects_bad_input() {
    let mut store = ContentStore::in_memory();
    assert!(matches!(
        save_user(&mut store, None, &user_form("", "x@y.z", ""), now()),
        Err(AccountError::MissingField("name"))
    ));
    assert!(matches!(
        save_user(&mut store, None, &user_form("X", "x@y.z", "owner"), now()),
        Err(AccountError::UnknownRole(_))
    ));
    assert!(matches!(
        save_user(&mut store, Some("u-2"), &user_form("X", "DINDA@example.com", ""), now()),
        Err(AccountError::EmailTaken(_))
    ));
    assert!(matches!(
        save_user(&mut store, Some("u-99"), &user_form("X", "x@y.z", ""), now()),
        Err(AccountError::Store(StoreError::NotFound { .. }))
    ));
    assert_eq!(store.users().len(), 5);
}

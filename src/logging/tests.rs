use super::*;

#[test]
fn writable_path_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("onair.log");

    let (target, used) = open_target(Some(path.clone()));
    assert!(matches!(target, Target::Pipe(_)));
    assert_eq!(used, Some(path.clone()));
    assert!(path.exists());
}

#[test]
fn unopenable_path_discards_instead_of_stderr() {
    let dir = tempfile::tempdir().unwrap();

    // A directory cannot be opened for appending.
    let (target, used) = open_target(Some(dir.path().to_path_buf()));
    assert!(matches!(target, Target::Pipe(_)));
    assert_eq!(used, None);

    let (target, used) = open_target(None);
    assert!(matches!(target, Target::Pipe(_)));
    assert_eq!(used, None);
}

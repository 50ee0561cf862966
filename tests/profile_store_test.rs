//! Profile store over a real git history. Skipped when git is missing.

mod common;

use common::{git_available, init_test_logging, open_git_store};
use deskforge::catalog::{builtin_catalog, ConfigValue};
use deskforge::engine::SelectionTree;
use deskforge::profile::Profile;
use deskforge::store::HistoryBackend;
use pretty_assertions::assert_eq;
use std::fs;
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

macro_rules! require_git {
    () => {
        if !git_available() {
            eprintln!("git not available, skipping");
            return;
        }
    };
}

fn profile_with(items: &[&str]) -> Profile {
    Profile {
        selected_items: items.iter().map(|s| s.to_string()).collect(),
        ..Profile::default()
    }
}

#[test]
fn test_open_seeds_presets_and_history() {
    require_git!();
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    let listing = store.list().unwrap();
    assert_eq!(listing.presets, vec!["developer", "minimal", "multimedia"]);
    assert!(listing.saved.is_empty());
    assert_eq!(store.history(10).len(), 1);
    assert_eq!(store.current_branch().as_deref(), Some("main"));

    // Reopening does not add another initial commit
    drop(store);
    let store = open_git_store(dir.path());
    assert_eq!(store.history(10).len(), 1);
}

#[test]
fn test_save_and_load_round_trip() {
    require_git!();
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    let catalog = Arc::new(builtin_catalog().unwrap());
    let mut tree = SelectionTree::new(Arc::clone(&catalog));
    tree.toggle_leaf("helix").unwrap();
    tree.set_configured_value("swappiness", ConfigValue::Number(35))
        .unwrap();
    let profile = Profile::capture(&tree);

    let receipt = store.save(&profile, Some("work"), None).unwrap();
    assert!(receipt.committed);
    assert_eq!(receipt.location(), &dir.path().join("saved/work.yaml"));

    let loaded = store.load(Some("work")).unwrap();
    assert_eq!(loaded.canonical().unwrap(), profile.canonical().unwrap());
    assert_eq!(
        store.load(None).unwrap().canonical().unwrap(),
        profile.canonical().unwrap()
    );

    let mut restored = SelectionTree::new(catalog);
    assert!(restored.apply_profile(&loaded).is_clean());
    assert_eq!(restored.selected_items(), tree.selected_items());
}

#[test]
fn test_saved_name_listed_once() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    store.save(&profile_with(&["noto"]), Some("work"), None).unwrap();
    store.save(&profile_with(&["roboto"]), Some("work"), None).unwrap();

    let listing = store.list().unwrap();
    assert_eq!(listing.saved, vec!["work".to_string()]);
    // The first save had no current document to back up
    assert_eq!(listing.backups.len(), 1);
}

#[test]
fn test_load_missing_and_invalid_names() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    assert!(store.load(Some("nope")).unwrap_err().is_not_found());
    assert!(store.load(Some("../escape")).is_err());
    assert!(store.save(&Profile::default(), Some("a/b"), None).is_err());
    assert_eq!(store.load(None).unwrap(), Profile::default());
    assert!(store.load(Some("minimal")).unwrap().selected_set().contains("zram"));
}

#[test]
fn test_every_save_adds_history() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    store.save(&profile_with(&["noto"]), None, Some("first")).unwrap();
    store.save(&profile_with(&["noto"]), None, Some("second")).unwrap();

    let history = store.history(10);
    let messages: Vec<&str> = history.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["second", "first", "Initialize profile store"]);
    assert_eq!(store.history(1).len(), 1);
}

#[test]
fn test_diff_between_revisions() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    store.save(&profile_with(&["noto"]), None, Some("one")).unwrap();
    store.save(&profile_with(&["noto", "vlc"]), None, Some("two")).unwrap();
    let history = store.history(10);
    let (newer, older) = (&history[0].revision, &history[1].revision);

    let diff = store.diff(Some(older), newer).unwrap();
    assert!(diff.contains("+- vlc"), "unexpected diff:\n{diff}");
    assert!(!diff.contains("created_at"));
    assert_eq!(store.diff(Some(older), newer).unwrap(), diff);

    assert_eq!(store.diff(Some(newer), newer).unwrap(), "");
    assert_eq!(store.diff(None, newer).unwrap(), "");
    assert!(store.diff(Some("no-such-rev"), newer).unwrap_err().is_not_found());
}

#[test]
fn test_restore_keeps_history_linear() {
    require_git!();
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    store.save(&profile_with(&["noto"]), None, Some("one")).unwrap();
    let target = store.history(1)[0].revision.clone();
    store.save(&profile_with(&["vlc"]), None, Some("two")).unwrap();
    let before = store.history(100).len();

    assert!(store.restore_from(&target));

    let after = store.history(100);
    assert_eq!(after.len(), before + 2);
    assert_eq!(store.load(None).unwrap().selected_items, vec!["noto".to_string()]);
    // The pre-restore state is still reachable
    let backup_rev = &after[1].revision;
    assert_eq!(
        store.profile_at(backup_rev).unwrap().selected_items,
        vec!["vlc".to_string()]
    );
}

#[test]
fn test_restore_from_unknown_revision_fails() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());
    store.save(&profile_with(&["noto"]), None, None).unwrap();

    let before = store.history(100).len();

    assert!(!store.restore_from("0000000000000000000000000000000000000000"));
    assert_eq!(store.load(None).unwrap().selected_items, vec!["noto".to_string()]);
    assert_eq!(store.history(100).len(), before);
}

#[test]
fn test_initial_revision_reads_as_empty_profile() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());
    let initial = store.history(1)[0].revision.clone();
    assert_eq!(store.profile_at(&initial).unwrap(), Profile::default());

    store.save(&profile_with(&["noto"]), None, None).unwrap();
    let head = store.history(1)[0].revision.clone();
    let diff = store.diff(Some(&initial), &head).unwrap();
    assert!(diff.contains("+- noto"), "unexpected diff:\n{diff}");

    let before = store.history(100).len();
    assert!(store.restore_from(&initial));
    assert_eq!(store.history(100).len(), before + 2);
    assert_eq!(store.load(None).unwrap(), Profile::default());
}

#[test]
fn test_backups_hold_previous_current() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());

    store.save(&profile_with(&["noto"]), None, None).unwrap();
    store.save(&profile_with(&["vlc"]), None, None).unwrap();

    let backups = store.list().unwrap().backups;
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("backup_"));
    assert_eq!(
        store.load_backup(&backups[0]).unwrap().selected_items,
        vec!["noto".to_string()]
    );
    assert!(store.load_backup("backup_19700101_000000_000000").unwrap_err().is_not_found());
}

#[test]
fn test_branches_isolate_saves() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());
    store.save(&profile_with(&["noto"]), None, None).unwrap();

    assert!(store.branch("laptop"));
    assert!(store.switch_branch("laptop"));
    assert_eq!(store.current_branch().as_deref(), Some("laptop"));
    store.save(&profile_with(&["obs"]), None, None).unwrap();

    assert!(store.switch_branch("main"));
    assert_eq!(store.load(None).unwrap().selected_items, vec!["noto".to_string()]);

    let names: Vec<String> = store.list_branches().into_iter().map(|b| b.name).collect();
    assert_eq!(names, vec!["laptop".to_string(), "main".to_string()]);

    assert!(!store.switch_branch("nowhere"));
    assert!(!store.branch("bad name"));
}

#[test]
fn test_push_to_bare_remote() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let remote = TempDir::new().unwrap();
    let status = Command::new("git")
        .args(["init", "-q", "--bare"])
        .arg(remote.path())
        .status()
        .unwrap();
    assert!(status.success());

    let store = open_git_store(dir.path());
    store.save(&profile_with(&["noto"]), None, None).unwrap();

    assert!(store.add_remote(&remote.path().to_string_lossy()));
    assert!(store.push("origin", None));

    let out = Command::new("git")
        .arg("--git-dir")
        .arg(remote.path())
        .args(["rev-parse", "main"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        store.history(1)[0].revision
    );
}

#[test]
fn test_failed_push_keeps_local_state() {
    require_git!();
    let dir = TempDir::new().unwrap();
    let store = open_git_store(dir.path());
    store.save(&profile_with(&["noto"]), None, None).unwrap();
    let before = store.history(100);

    let missing = dir.path().join("no-such-remote.git");
    assert!(store.add_named_remote("backup", &missing.to_string_lossy()));
    assert!(!store.push("backup", None));
    assert!(!store.pull("backup", None));

    assert_eq!(store.history(100), before);
    assert_eq!(store.load(None).unwrap().selected_items, vec!["noto".to_string()]);
    assert!(store.backend().is_initialized());
    assert!(fs::metadata(dir.path().join("current.yaml")).is_ok());
}

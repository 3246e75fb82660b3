//! End-to-end façade scenarios S1-S3 and S6, plus the round-trip and
//! HEAD-invariance properties.

use std::path::Path;

use kit::{Error, Repository};
use tempfile::TempDir;

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
}

/// S1: init in an empty directory creates HEAD on main, a branch ref
/// holding a 32-hex commit id, and an initial commit with no parent.
#[test]
fn s1_init_empty_directory() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();

    assert!(temp.path().join(".kit/HEAD").exists());
    let head_content = std::fs::read_to_string(temp.path().join(".kit/HEAD")).unwrap();
    assert_eq!(head_content.trim(), "refs/heads/main");

    let branch_content = std::fs::read_to_string(temp.path().join(".kit/refs/heads/main")).unwrap();
    assert_eq!(branch_content.trim().len(), 32);

    let commits = repo.list_commits(None).unwrap();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].parent, None);
}

/// S2: add then commit a single file persists its compressed blob and
/// clears the index.
#[test]
fn s2_add_then_commit_single_file() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();
    write(temp.path(), "a.txt", "hello\n");

    repo.add(Path::new("a.txt")).unwrap();
    repo.commit("alice", "x").unwrap();

    assert!(!temp.path().join(".kit/INDEX").exists());

    let commits = repo.list_commits(None).unwrap();
    let tree = commits[0].tree;
    let store = kit::ObjectStore::new(temp.path().join(".kit/objects"));
    let entries = store.walk_tree(&tree).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, Path::new("a.txt"));

    let restored = temp.path().join("restored.txt");
    store.get_blob(&entries[0].1, &restored).unwrap();
    assert_eq!(std::fs::read_to_string(restored).unwrap(), "hello\n");
}

/// S3: removing a file and committing drops it from the new tree, and
/// checking out the prior commit restores it.
#[test]
fn s3_remove_reverts_and_checkout_restores() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();
    write(temp.path(), "a.txt", "hello\n");
    repo.add(Path::new("a.txt")).unwrap();
    let first = repo.commit("alice", "x").unwrap();

    repo.remove(Path::new("a.txt")).unwrap();
    repo.commit("alice", "y").unwrap();
    assert!(!temp.path().join("a.txt").exists());

    repo.checkout(&first.to_hex(), false).unwrap();
    assert_eq!(std::fs::read_to_string(temp.path().join("a.txt")).unwrap(), "hello\n");
}

/// S6: checkout with a dirty index refuses without force, and succeeds
/// (discarding the staged change) with force.
#[test]
fn s6_checkout_with_dirty_index() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();
    repo.create_branch("other").unwrap();

    write(temp.path(), "a.txt", "staged\n");
    repo.add(Path::new("a.txt")).unwrap();

    let result = repo.checkout("other", false);
    assert!(matches!(result, Err(Error::UncommittedChanges)));

    repo.checkout("other", true).unwrap();
    assert_eq!(repo.current_branch().unwrap(), "other");
    assert!(!temp.path().join(".kit/INDEX").exists());
}

/// Property 4: committing and checking out a snapshot round-trips file
/// content exactly.
#[test]
fn round_trip_snapshot_property() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();
    write(temp.path(), "nested/dir/file.txt", "payload\nwith\nlines\n");
    repo.add(Path::new(".")).unwrap();
    let commit = repo.commit("alice", "snapshot").unwrap();

    write(temp.path(), "nested/dir/file.txt", "overwritten\n");
    repo.checkout(&commit.to_hex(), true).unwrap();

    let content = std::fs::read_to_string(temp.path().join("nested/dir/file.txt")).unwrap();
    assert_eq!(content, "payload\nwith\nlines\n");
}

/// Property 10: a failed operation leaves HEAD untouched.
#[test]
fn head_invariant_on_failed_checkout() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path(), "alice").unwrap();
    let before = std::fs::read_to_string(temp.path().join(".kit/HEAD")).unwrap();

    let result = repo.checkout("does-not-exist", false);
    assert!(result.is_err());

    let after = std::fs::read_to_string(temp.path().join(".kit/HEAD")).unwrap();
    assert_eq!(before, after);
}

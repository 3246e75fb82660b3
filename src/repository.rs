//! The repository façade: lifecycle, staging, commit/checkout, refs, and
//! merge, dispatching into `objects`, `index`, `refs`, `diff`, and `merge`.

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::diff::{self, diff_trees, LineChange, TreeDelta};
use crate::error::{Error, Result};
use crate::index::{Index, Op};
use crate::infra::{self, REPO_DIR};
use crate::merge::{self, Conflict};
use crate::objects::{string_id, tree_id_from_blob_ids, CommitRecord, ObjectStore, Oid};
use crate::refs::{branch, tag, Head, TagRecord};

const SEED_MIN: u64 = 10_000_000;
const SEED_MAX: u64 = 100_000_000;
const MAIN_BRANCH: &str = "main";

/// A `kit` repository rooted at a workspace directory.
///
/// Holds only the workspace path; HEAD, the current branch tip, and the
/// seed are re-read from disk on every call rather than cached, so that
/// no operation observes state left behind by another (§9 of the design
/// notes: no shared mutable state across operations).
#[derive(Debug, Clone)]
pub struct Repository {
    workspace_path: PathBuf,
}

impl Repository {
    /// Opens a repository handle for `workspace_path` without touching disk.
    /// Use `init` to create a new repository, or call a façade method
    /// (which checks existence) to operate on one that already exists.
    pub fn new<P: AsRef<Path>>(workspace_path: P) -> Self {
        Repository {
            workspace_path: workspace_path.as_ref().to_path_buf(),
        }
    }

    /// The workspace root.
    pub fn path(&self) -> &Path {
        &self.workspace_path
    }

    fn repo_dir(&self) -> PathBuf {
        self.workspace_path.join(REPO_DIR)
    }

    fn objects_dir(&self) -> PathBuf {
        self.repo_dir().join("objects")
    }

    fn store(&self) -> ObjectStore {
        ObjectStore::new(self.objects_dir())
    }

    fn index_path(&self) -> PathBuf {
        self.repo_dir().join("INDEX")
    }

    fn seed_path(&self) -> PathBuf {
        self.repo_dir().join("SEED")
    }

    fn scratch_dir(&self) -> PathBuf {
        self.repo_dir().join("TEMP")
    }

    fn ensure_exists(&self) -> Result<()> {
        if !self.repo_dir().is_dir() {
            return Err(Error::RepositoryMissing(self.workspace_path.clone()));
        }
        Ok(())
    }

    fn seed(&self) -> Result<u64> {
        let content = infra::read_file(&self.seed_path())?;
        String::from_utf8_lossy(&content)
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput("malformed SEED file".to_string()))
    }

    fn head(&self) -> Result<Head> {
        Head::read(&self.repo_dir())
    }

    /// The commit id HEAD currently resolves to.
    fn current_commit_id(&self) -> Result<Oid> {
        match self.head()? {
            Head::Attached(name) => branch::tip(&self.repo_dir(), &name),
            Head::Detached(oid) => Ok(oid),
        }
    }

    /// Resolves a name as a branch, then a tag, then a bare commit id, in
    /// that order — the same priority `checkout` uses.
    fn resolve_name(&self, name: &str) -> Result<Oid> {
        let repo_dir = self.repo_dir();
        if branch::exists(&repo_dir, name) {
            return branch::tip(&repo_dir, name);
        }
        if tag::exists(&repo_dir, name) {
            return Ok(tag::read(&repo_dir, name)?.commit_id);
        }
        Oid::from_hex(name).map_err(|_| Error::CheckoutError(format!("no branch, tag, or commit named {name}")))
    }

    // -- lifecycle -----------------------------------------------------

    /// Creates a new repository at `workspace_path`. Fails `AlreadyExists`
    /// if `.kit` already exists there.
    #[tracing::instrument(skip(username))]
    pub fn init<P: AsRef<Path>>(workspace_path: P, username: &str) -> Result<Self> {
        let workspace_path = workspace_path.as_ref().to_path_buf();
        let repo_dir = workspace_path.join(REPO_DIR);
        if repo_dir.exists() {
            return Err(Error::AlreadyExists(repo_dir.display().to_string()));
        }

        std::fs::create_dir_all(&workspace_path)?;
        std::fs::create_dir_all(repo_dir.join("objects"))?;
        std::fs::create_dir_all(repo_dir.join("refs").join("heads"))?;
        std::fs::create_dir_all(repo_dir.join("refs").join("tags"))?;
        infra::write_file_atomic(repo_dir.join("INDEX"), b"")?;

        let seed = rand::rng().random_range(SEED_MIN..SEED_MAX);
        infra::write_file_atomic(repo_dir.join("SEED"), seed.to_string().as_bytes())?;

        mark_hidden(&repo_dir);

        let repo = Repository { workspace_path };

        let store = repo.store();
        let empty_tree = tree_id_from_blob_ids(seed, std::iter::empty());
        store.put_tree(&empty_tree, None, std::iter::empty())?;

        let timestamp = crate::infra::now_iso();
        let description = "initial commit";
        let commit_id = string_id(seed, &format!("{username}{description}{timestamp}"));
        store.put_commit(&commit_id, username, &timestamp, description, &empty_tree, None)?;

        branch::create(&repo_dir, MAIN_BRANCH, &commit_id)?;
        Head::Attached(MAIN_BRANCH.to_string()).write(&repo_dir)?;

        tracing::info!(%commit_id, "initialized repository");
        Ok(repo)
    }

    // -- staging ---------------------------------------------------------

    /// Stages `relative_path` (a file or directory) for addition.
    pub fn add(&self, relative_path: &Path) -> Result<()> {
        self.ensure_exists()?;
        infra::safe_join(&self.workspace_path, relative_path)?;
        let seed = self.seed()?;
        let baseline = self.baseline_tree()?;

        let mut index = Index::load(&self.index_path())?;
        index.scan(&self.store(), &self.workspace_path, relative_path, baseline.as_ref(), seed, Op::Add)?;
        self.persist_index(&index)
    }

    /// Stages `relative_path` for removal.
    pub fn remove(&self, relative_path: &Path) -> Result<()> {
        self.ensure_exists()?;
        infra::safe_join(&self.workspace_path, relative_path)?;
        let seed = self.seed()?;
        let baseline = self.baseline_tree()?;

        let mut index = Index::load(&self.index_path())?;
        index.scan(&self.store(), &self.workspace_path, relative_path, baseline.as_ref(), seed, Op::Del)?;
        self.persist_index(&index)
    }

    /// Writes `index`, or removes the INDEX file entirely if it has become
    /// empty — an empty-but-present file would otherwise look staged to
    /// `commit`'s nothing-to-commit check.
    fn persist_index(&self, index: &Index) -> Result<()> {
        let index_path = self.index_path();
        if index.is_empty() {
            if index_path.exists() {
                std::fs::remove_file(&index_path)?;
            }
            Ok(())
        } else {
            index.write(&index_path)
        }
    }

    /// The current staged entries, in persisted order.
    pub fn list_index(&self) -> Result<Vec<(PathBuf, Oid, Op)>> {
        self.ensure_exists()?;
        let index = Index::load(&self.index_path())?;
        Ok(index.iter().map(|(p, id, op)| (p.to_path_buf(), *id, op)).collect())
    }

    fn baseline_tree(&self) -> Result<Option<Oid>> {
        match self.current_commit_id() {
            Ok(commit_id) => Ok(Some(self.store().get_commit(&commit_id)?.tree)),
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    // -- commit ----------------------------------------------------------

    /// Records a commit from the current staging index. Fails
    /// `NothingToCommit` if there is a baseline commit and no staged
    /// changes.
    #[tracing::instrument(skip(self, username, description))]
    pub fn commit(&self, username: &str, description: &str) -> Result<Oid> {
        self.ensure_exists()?;
        let seed = self.seed()?;
        let index_path = self.index_path();
        let index = Index::load(&index_path)?;

        let parent = self.current_commit_id().ok();
        if parent.is_some() && !index_path.exists() {
            return Err(Error::NothingToCommit);
        }

        let timestamp = infra::now_iso();
        let commit_id = string_id(seed, &format!("{username}{description}{timestamp}"));
        let tree_id = tree_id_from_blob_ids(seed, index.blob_ids_in_order());

        let store = self.store();
        store.put_commit(&commit_id, username, &timestamp, description, &tree_id, parent.as_ref())?;

        let baseline_tree = match parent {
            Some(p) => Some(store.get_commit(&p)?.tree),
            None => None,
        };
        let entries = index.iter().map(|(path, id, op)| (path, id, op == Op::Add));
        store.put_tree(&tree_id, baseline_tree.as_ref(), entries)?;

        index.apply_deletes_to_workspace(&self.workspace_path)?;
        index.persist_blobs(&store, &self.workspace_path)?;

        self.advance_head(&commit_id)?;
        let _ = std::fs::remove_file(&index_path);

        tracing::info!(%commit_id, %tree_id, "committed");
        Ok(commit_id)
    }

    /// Re-records the current commit with a new message, preserving its
    /// tree and parent (a new commit id; the original object is untouched).
    pub fn amend(&self, username: &str, description: &str) -> Result<Oid> {
        self.ensure_exists()?;
        let seed = self.seed()?;
        let current_id = self.current_commit_id()?;
        let current = self.store().get_commit(&current_id)?;

        let timestamp = infra::now_iso();
        let new_id = string_id(seed, &format!("{username}{description}{timestamp}"));
        self.store()
            .put_commit(&new_id, username, &timestamp, description, &current.tree, current.parent.as_ref())?;

        self.advance_head(&new_id)?;
        tracing::info!(old = %current_id, new = %new_id, "amended commit");
        Ok(new_id)
    }

    fn advance_head(&self, commit_id: &Oid) -> Result<()> {
        let repo_dir = self.repo_dir();
        match self.head()? {
            Head::Attached(name) => branch::set_tip(&repo_dir, &name, commit_id),
            Head::Detached(_) => Head::Detached(*commit_id).write(&repo_dir),
        }
    }

    /// Walks the parent chain from the current commit, stopping at
    /// `"None"` or after `limit` entries.
    pub fn list_commits(&self, limit: Option<usize>) -> Result<Vec<CommitRecord>> {
        self.ensure_exists()?;
        let start = self.current_commit_id()?;
        crate::log::walk(&self.store(), start, limit)
    }

    // -- diff --------------------------------------------------------------

    /// Diffs the trees of two commits (resolved as branch/tag/commit names).
    pub fn diff_commits(&self, a: &str, b: &str) -> Result<Vec<TreeDelta>> {
        self.ensure_exists()?;
        let store = self.store();
        let tree_a = store.get_commit(&self.resolve_name(a)?)?.tree;
        let tree_b = store.get_commit(&self.resolve_name(b)?)?.tree;
        diff_trees(&store, &tree_a, &tree_b)
    }

    /// Diffs one file's content between two commits.
    pub fn diff_files(&self, relative_path: &Path, a: &str, b: &str) -> Result<Vec<LineChange>> {
        self.ensure_exists()?;
        let store = self.store();
        let tree_a = store.get_commit(&self.resolve_name(a)?)?.tree;
        let tree_b = store.get_commit(&self.resolve_name(b)?)?.tree;
        let blob_a = store.tree_entry(&tree_a, relative_path)?;
        let blob_b = store.tree_entry(&tree_b, relative_path)?;
        diff::diff_blobs(&store, &self.scratch_dir(), blob_a.as_ref(), blob_b.as_ref())
    }

    // -- branches ------------------------------------------------------

    /// Creates `name` pointing at the current commit.
    pub fn create_branch(&self, name: &str) -> Result<()> {
        self.ensure_exists()?;
        branch::create(&self.repo_dir(), name, &self.current_commit_id()?)
    }

    pub fn list_branches(&self) -> Result<Vec<String>> {
        self.ensure_exists()?;
        branch::list(&self.repo_dir())
    }

    /// Deletes branch `name`. If HEAD is attached to it, detaches HEAD to
    /// the branch's current tip first.
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.ensure_exists()?;
        let repo_dir = self.repo_dir();
        if let Head::Attached(current) = self.head()? {
            if current == name {
                let tip = branch::tip(&repo_dir, name)?;
                Head::Detached(tip).write(&repo_dir)?;
            }
        }
        branch::delete(&repo_dir, name)
    }

    // -- tags ------------------------------------------------------------

    pub fn create_tag(&self, name: &str, username: &str, description: &str) -> Result<()> {
        self.ensure_exists()?;
        let timestamp = infra::now_iso();
        let commit_id = self.current_commit_id()?;
        tag::create(&self.repo_dir(), name, username, &timestamp, description, &commit_id)
    }

    pub fn list_tags(&self) -> Result<Vec<String>> {
        self.ensure_exists()?;
        tag::list(&self.repo_dir())
    }

    pub fn read_tag(&self, name: &str) -> Result<TagRecord> {
        self.ensure_exists()?;
        tag::read(&self.repo_dir(), name)
    }

    pub fn delete_tag(&self, name: &str) -> Result<()> {
        self.ensure_exists()?;
        tag::delete(&self.repo_dir(), name)
    }

    // -- checkout ------------------------------------------------------

    /// Checks out `name` (branch, then tag, then bare commit id, first
    /// match wins). Fails `UncommittedChanges` if the index is non-empty
    /// and `force` is false.
    #[tracing::instrument(skip(self))]
    pub fn checkout(&self, name: &str, force: bool) -> Result<()> {
        self.ensure_exists()?;
        self.guard_uncommitted(force)?;

        let repo_dir = self.repo_dir();
        let new_head = if branch::exists(&repo_dir, name) {
            Head::Attached(name.to_string())
        } else if tag::exists(&repo_dir, name) {
            Head::Detached(tag::read(&repo_dir, name)?.commit_id)
        } else {
            let oid = Oid::from_hex(name)
                .map_err(|_| Error::CheckoutError(format!("no branch, tag, or commit named {name}")))?;
            if !self.store().exists(&oid) {
                return Err(Error::CheckoutError(format!("no branch, tag, or commit named {name}")));
            }
            Head::Detached(oid)
        };

        let target_commit = match &new_head {
            Head::Attached(branch_name) => branch::tip(&repo_dir, branch_name)?,
            Head::Detached(oid) => *oid,
        };
        self.checkout_to(&new_head, &target_commit)
    }

    /// Checks out `name` as a branch specifically, bypassing tag/commit
    /// resolution.
    pub fn checkout_branch(&self, name: &str, force: bool) -> Result<()> {
        self.ensure_exists()?;
        self.guard_uncommitted(force)?;
        let repo_dir = self.repo_dir();
        let target_commit = branch::tip(&repo_dir, name)?;
        self.checkout_to(&Head::Attached(name.to_string()), &target_commit)
    }

    /// Checks out `name` as a tag specifically (always detaches HEAD).
    pub fn checkout_tag(&self, name: &str, force: bool) -> Result<()> {
        self.ensure_exists()?;
        self.guard_uncommitted(force)?;
        let commit_id = tag::read(&self.repo_dir(), name)?.commit_id;
        self.checkout_to(&Head::Detached(commit_id), &commit_id)
    }

    /// Checks out a bare commit id specifically (always detaches HEAD).
    pub fn checkout_commit(&self, id: &Oid, force: bool) -> Result<()> {
        self.ensure_exists()?;
        self.guard_uncommitted(force)?;
        if !self.store().exists(id) {
            return Err(Error::NotFound(id.to_hex()));
        }
        self.checkout_to(&Head::Detached(*id), id)
    }

    fn guard_uncommitted(&self, force: bool) -> Result<()> {
        if !force && self.index_path().exists() {
            return Err(Error::UncommittedChanges);
        }
        Ok(())
    }

    /// Core checkout sequence: update HEAD, remove the current tree's
    /// files from the workspace, materialize the target tree.
    fn checkout_to(&self, new_head: &Head, target_commit: &Oid) -> Result<()> {
        let repo_dir = self.repo_dir();
        let store = self.store();

        let previous_id = self.current_commit_id().ok();

        new_head.write(&repo_dir)?;

        if let Some(current_id) = previous_id {
            if let Ok(current) = store.get_commit(&current_id) {
                for (rel, _) in store.walk_tree(&current.tree)? {
                    let abs = self.workspace_path.join(&rel);
                    if abs.exists() {
                        let _ = std::fs::remove_file(&abs);
                    }
                }
            }
        }

        let target = store.get_commit(target_commit)?;
        for (rel, blob_id) in store.walk_tree(&target.tree)? {
            store.get_blob(&blob_id, &self.workspace_path.join(&rel))?;
        }

        tracing::debug!(commit = %target_commit, "checked out");
        Ok(())
    }

    /// The branch HEAD is attached to. Fails `NotOnBranch` if detached.
    pub fn current_branch(&self) -> Result<String> {
        self.ensure_exists()?;
        match self.head()? {
            Head::Attached(name) => Ok(name),
            Head::Detached(_) => Err(Error::NotOnBranch),
        }
    }

    // -- merge -----------------------------------------------------------

    /// Merges `additional` into `main`. Unless `cherry_pick`, fast-forwards
    /// when `main` is an ancestor of `additional`. Otherwise runs a
    /// two-direction tree overlay; any conflicts are written to the
    /// workspace as three-way merge renderings, staged, and reported via
    /// `MergeConflict` (the caller resolves and re-commits). If no
    /// conflicts and not `no_commit`, commits with `message`.
    #[tracing::instrument(skip(self, message, username))]
    pub fn merge(
        &self,
        main: &str,
        additional: &str,
        message: &str,
        username: &str,
        cherry_pick: bool,
        no_commit: bool,
    ) -> Result<()> {
        self.ensure_exists()?;
        let store = self.store();
        let seed = self.seed()?;

        let main_id = self.resolve_name(main)?;
        let additional_id = self.resolve_name(additional)?;
        if !store.exists(&main_id) {
            return Err(Error::NotFound(main.to_string()));
        }
        if !store.exists(&additional_id) {
            return Err(Error::NotFound(additional.to_string()));
        }

        if !cherry_pick && merge::is_ancestor(&store, &main_id, &additional_id)? {
            tracing::debug!("fast-forward merge");
            let head = self.head()?;
            self.checkout_to(&head, &additional_id)?;
            self.advance_head(&additional_id)?;
            return Ok(());
        }

        let main_tree = store.get_commit(&main_id)?.tree;
        let additional_tree = store.get_commit(&additional_id)?.tree;

        let mut index = Index::load(&self.index_path())?;
        // Only the first direction's conflicts are kept (ours = main, theirs
        // = additional); the reverse pass runs purely to materialize files
        // unique to `additional` into the workspace, and its own conflict
        // list — the same paths, ours/theirs swapped — is discarded. Both
        // passes stage newly-materialized files against `main_tree`, the
        // current commit's tree, never the other side's `dst_tree`.
        let conflicts = merge::overlay(&store, &self.workspace_path, &mut index, &additional_tree, &main_tree, &main_tree, seed)?;
        merge::overlay(&store, &self.workspace_path, &mut index, &main_tree, &additional_tree, &main_tree, seed)?;

        if !conflicts.is_empty() {
            let scratch = self.scratch_dir();
            let mut paths = Vec::with_capacity(conflicts.len());
            for conflict in &conflicts {
                merge::write_conflict_file(&store, &self.workspace_path, &scratch, &conflict.path, &conflict.ours, &conflict.theirs)?;
                index.scan(&store, &self.workspace_path, &conflict.path, Some(&main_tree), seed, Op::Add)?;
                paths.push(conflict.path.clone());
            }
            self.persist_index(&index)?;
            return Err(Error::MergeConflict(paths));
        }

        self.persist_index(&index)?;
        if no_commit {
            return Ok(());
        }
        self.commit(username, message)?;
        Ok(())
    }

}

/// Best-effort: marks `path` hidden on Windows. A no-op error is
/// swallowed since hiding the directory is cosmetic, not load-bearing.
#[cfg(windows)]
fn mark_hidden(path: &Path) {
    let _ = std::process::Command::new("attrib").arg("+h").arg(path).status();
}

#[cfg(not(windows))]
fn mark_hidden(_path: &Path) {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
    }

    #[test]
    fn test_init_creates_main_branch_with_initial_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();

        assert_eq!(repo.current_branch().unwrap(), "main");
        let commits = repo.list_commits(None).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].description, "initial commit");
    }

    #[test]
    fn test_init_twice_fails() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path(), "alice").unwrap();
        let result = Repository::init(temp.path(), "alice");
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
    }

    #[test]
    fn test_add_commit_roundtrip() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        write(temp.path(), "a.txt", "hello");

        repo.add(Path::new("a.txt")).unwrap();
        assert_eq!(repo.list_index().unwrap().len(), 1);

        repo.commit("alice", "add a.txt").unwrap();
        assert!(!repo.index_path().exists());
        assert_eq!(repo.list_commits(None).unwrap().len(), 2);
    }

    #[test]
    fn test_commit_with_nothing_staged_fails() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        let result = repo.commit("alice", "empty");
        assert!(matches!(result, Err(Error::NothingToCommit)));
    }

    #[test]
    fn test_add_then_unstage_back_to_baseline_removes_index_file() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        write(temp.path(), "a.txt", "v1");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("alice", "v1").unwrap();

        write(temp.path(), "a.txt", "v2");
        repo.add(Path::new("a.txt")).unwrap();
        assert!(repo.index_path().exists());

        write(temp.path(), "a.txt", "v1");
        repo.add(Path::new("a.txt")).unwrap();
        assert!(!repo.index_path().exists());
        assert!(matches!(repo.commit("alice", "no-op"), Err(Error::NothingToCommit)));
    }

    #[test]
    fn test_checkout_round_trip_restores_file() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        write(temp.path(), "a.txt", "v1");
        repo.add(Path::new("a.txt")).unwrap();
        let first = repo.commit("alice", "v1").unwrap();

        write(temp.path(), "a.txt", "v2");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("alice", "v2").unwrap();

        repo.checkout(&first.to_hex(), false).unwrap();
        let content = std::fs::read_to_string(temp.path().join("a.txt")).unwrap();
        assert_eq!(content, "v1");
    }

    #[test]
    fn test_checkout_with_uncommitted_changes_fails_without_force() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        write(temp.path(), "a.txt", "v1");
        repo.add(Path::new("a.txt")).unwrap();

        let result = repo.checkout("main", false);
        assert!(matches!(result, Err(Error::UncommittedChanges)));
    }

    #[test]
    fn test_branch_create_list_delete() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        repo.create_branch("feature").unwrap();
        assert_eq!(repo.list_branches().unwrap(), vec!["feature", "main"]);

        repo.checkout("main", false).unwrap();
        repo.delete_branch("feature").unwrap();
        assert_eq!(repo.list_branches().unwrap(), vec!["main"]);
    }

    #[test]
    fn test_delete_branch_detaches_head_when_current() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        repo.create_branch("feature").unwrap();
        repo.checkout("feature", false).unwrap();

        repo.delete_branch("feature").unwrap();
        assert!(matches!(repo.head().unwrap(), Head::Detached(_)));
    }

    #[test]
    fn test_tag_create_and_read() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        repo.create_tag("v1", "alice", "release").unwrap();
        assert_eq!(repo.list_tags().unwrap(), vec!["v1"]);
        let record = repo.read_tag("v1").unwrap();
        assert_eq!(record.description, "release");
    }

    #[test]
    fn test_current_branch_fails_when_detached() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        let first = repo.list_commits(None).unwrap()[0].id;
        repo.checkout(&first.to_hex(), false).unwrap();
        assert!(matches!(repo.current_branch(), Err(Error::NotOnBranch)));
    }

    #[test]
    fn test_merge_fast_forward() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        repo.create_branch("feature").unwrap();
        repo.checkout("feature", false).unwrap();

        write(temp.path(), "a.txt", "from feature");
        repo.add(Path::new("a.txt")).unwrap();
        repo.commit("alice", "feature work").unwrap();

        repo.checkout("main", false).unwrap();
        repo.merge("main", "feature", "merge feature", "alice", false, false).unwrap();
        assert!(temp.path().join("a.txt").exists());
    }

    #[test]
    fn test_merge_conflict_reports_paths_and_writes_markers() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path(), "alice").unwrap();
        write(temp.path(), "shared.txt", "base\n");
        repo.add(Path::new("shared.txt")).unwrap();
        repo.commit("alice", "base").unwrap();

        repo.create_branch("feature").unwrap();
        repo.checkout("feature", false).unwrap();
        write(temp.path(), "shared.txt", "base\nfeature change\n");
        repo.add(Path::new("shared.txt")).unwrap();
        repo.commit("alice", "feature change").unwrap();

        repo.checkout("main", false).unwrap();
        write(temp.path(), "shared.txt", "base\nmain change\n");
        repo.add(Path::new("shared.txt")).unwrap();
        repo.commit("alice", "main change").unwrap();

        let result = repo.merge("main", "feature", "merge", "alice", false, false);
        assert!(matches!(result, Err(Error::MergeConflict(_))));
        let content = std::fs::read_to_string(temp.path().join("shared.txt")).unwrap();
        assert!(content.contains("<<<<<<< YOURS"));
        assert!(content.contains(">>>>>>> THEIRS"));
    }
}

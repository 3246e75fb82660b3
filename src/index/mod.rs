//! The staging index: a `relative-path -> (blob-id, op)` map persisted as
//! the `INDEX` file while there are uncommitted changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::infra::{is_dot_path, write_file_atomic};
use crate::objects::{blob_id_for_file, ObjectStore, Oid};

/// Whether a staged path is an addition/modification or a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// File content was added or changed relative to the baseline.
    Add,
    /// File was removed relative to the baseline.
    Del,
}

impl Op {
    fn sign(self) -> char {
        match self {
            Op::Add => '+',
            Op::Del => '-',
        }
    }

    fn from_sign(c: char) -> Result<Self> {
        match c {
            '+' => Ok(Op::Add),
            '-' => Ok(Op::Del),
            _ => Err(Error::InvalidInput(format!("invalid index sign: {c}"))),
        }
    }
}

/// The in-memory staging map. Kept in a `BTreeMap` so iteration — and thus
/// persistence and the tree id derived from it — is always sorted by path,
/// per the fixed index-ordering design decision.
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: BTreeMap<PathBuf, (Oid, Op)>,
}

impl Index {
    /// An empty index.
    pub fn new() -> Self {
        Index {
            entries: BTreeMap::new(),
        }
    }

    /// Loads the index from `index_path`, or returns an empty index if the
    /// file does not exist (the index only exists while changes are staged).
    pub fn load(index_path: &Path) -> Result<Self> {
        if !index_path.exists() {
            return Ok(Index::new());
        }

        let content = fs::read_to_string(index_path)?;
        let mut entries = BTreeMap::new();

        for line in content.lines() {
            if line.is_empty() {
                continue;
            }
            let mut parts = line.rsplitn(3, ',');
            let sign = parts.next().ok_or_else(|| malformed(line))?;
            let blob_hex = parts.next().ok_or_else(|| malformed(line))?;
            let path_str = parts.next().ok_or_else(|| malformed(line))?;

            let op = Op::from_sign(sign.chars().next().ok_or_else(|| malformed(line))?)?;
            let blob_id = Oid::from_hex(blob_hex).map_err(|_| malformed(line))?;
            let path = normalize_path(path_str);

            entries.insert(path, (blob_id, op));
        }

        Ok(Index { entries })
    }

    /// Persists the index to `index_path`, one `path,blob-id,sign` line per
    /// entry, sorted by path.
    pub fn write(&self, index_path: &Path) -> Result<()> {
        let mut content = String::new();
        for (path, (blob_id, op)) in &self.entries {
            content.push_str(&path.to_string_lossy().replace('\\', "/"));
            content.push(',');
            content.push_str(&blob_id.to_hex());
            content.push(',');
            content.push(op.sign());
            content.push('\n');
        }
        write_file_atomic(index_path, content.as_bytes())
    }

    /// True if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Removes all staged entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates staged entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Oid, Op)> {
        self.entries.iter().map(|(p, (id, op))| (p.as_path(), id, *op))
    }

    /// The blob ids in persisted (sorted-path) order, for tree-id hashing.
    pub fn blob_ids_in_order(&self) -> impl Iterator<Item = &Oid> {
        self.entries.values().map(|(id, _)| id)
    }

    /// Stages `local_path` under `mode` against `baseline_tree`. If
    /// `local_path` is a directory, recurses over its files, skipping any
    /// path with a dot-prefixed non-leaf component.
    pub fn scan(
        &mut self,
        store: &ObjectStore,
        workspace_root: &Path,
        local_path: &Path,
        baseline_tree: Option<&Oid>,
        seed: u64,
        mode: Op,
    ) -> Result<()> {
        let abs_path = workspace_root.join(local_path);

        if local_path != Path::new(".") && is_dot_path(local_path, abs_path.is_dir()) {
            return Ok(());
        }

        if abs_path.is_dir() {
            let mut children: Vec<_> = fs::read_dir(&abs_path)?.collect::<std::result::Result<_, _>>()?;
            children.sort_by_key(|e| e.file_name());
            for entry in children {
                let child_rel = if local_path == Path::new(".") {
                    PathBuf::from(entry.file_name())
                } else {
                    local_path.join(entry.file_name())
                };
                self.scan(store, workspace_root, &child_rel, baseline_tree, seed, mode)?;
            }
            return Ok(());
        }

        let rel = normalize_path(&local_path.to_string_lossy());
        let current_id = blob_id_for_file(seed, workspace_root, &rel)?;

        let baseline_id = match baseline_tree {
            Some(tree_id) => store.tree_entry(tree_id, &rel)?,
            None => None,
        };

        match mode {
            Op::Add => {
                if baseline_id != Some(current_id) {
                    self.entries.insert(rel, (current_id, Op::Add));
                } else {
                    self.entries.remove(&rel);
                }
            }
            Op::Del => {
                if baseline_id.is_some() {
                    self.entries.insert(rel, (current_id, Op::Del));
                } else {
                    self.entries.remove(&rel);
                }
            }
        }

        Ok(())
    }

    /// Removes workspace files for every DEL entry, if still present.
    pub fn apply_deletes_to_workspace(&self, workspace_root: &Path) -> Result<()> {
        for (path, (_, op)) in &self.entries {
            if *op == Op::Del {
                let abs = workspace_root.join(path);
                if abs.exists() {
                    fs::remove_file(&abs)?;
                }
            }
        }
        Ok(())
    }

    /// Compresses and stores every ADD entry's workspace file as a blob.
    pub fn persist_blobs(&self, store: &ObjectStore, workspace_root: &Path) -> Result<()> {
        for (path, (blob_id, op)) in &self.entries {
            if *op == Op::Add {
                store.put_blob(workspace_root, path, blob_id)?;
            }
        }
        Ok(())
    }
}

fn malformed(line: &str) -> Error {
    Error::InvalidObject {
        id: String::new(),
        reason: format!("malformed index line: {line}"),
    }
}

fn normalize_path(s: &str) -> PathBuf {
    s.replace('\\', "/").split('/').collect()
}

//! Tree and file diffing.

pub mod line_diff;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::infra;
use crate::objects::{ObjectStore, Oid};

pub use line_diff::{diff_lines, LineChange};

/// One entry in a tree diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDelta {
    /// Present only in the second tree.
    Added(PathBuf),
    /// Present in both trees with differing blob ids.
    Changed(PathBuf),
    /// Present only in the first tree.
    Removed(PathBuf),
}

impl TreeDelta {
    /// The path this delta concerns.
    pub fn path(&self) -> &Path {
        match self {
            TreeDelta::Added(p) | TreeDelta::Changed(p) | TreeDelta::Removed(p) => p,
        }
    }

    /// The sigil used by the textual rendering (`+`, `~`, `-`).
    pub fn sigil(&self) -> &'static str {
        match self {
            TreeDelta::Added(_) => "+",
            TreeDelta::Changed(_) => "~",
            TreeDelta::Removed(_) => "-",
        }
    }
}

/// Diffs two trees: added (only in `tree2`), changed (differing blob id),
/// removed (only in `tree1`), each section sorted by path, in that order.
pub fn diff_trees(store: &ObjectStore, tree1: &Oid, tree2: &Oid) -> Result<Vec<TreeDelta>> {
    let left: BTreeMap<PathBuf, Oid> = store.walk_tree(tree1)?.into_iter().collect();
    let right: BTreeMap<PathBuf, Oid> = store.walk_tree(tree2)?.into_iter().collect();

    let mut added = Vec::new();
    let mut changed = Vec::new();
    let mut removed = Vec::new();

    for (path, right_id) in &right {
        match left.get(path) {
            None => added.push(path.clone()),
            Some(left_id) if left_id != right_id => changed.push(path.clone()),
            Some(_) => {}
        }
    }
    for path in left.keys() {
        if !right.contains_key(path) {
            removed.push(path.clone());
        }
    }

    added.sort();
    changed.sort();
    removed.sort();

    let mut out = Vec::with_capacity(added.len() + changed.len() + removed.len());
    out.extend(added.into_iter().map(TreeDelta::Added));
    out.extend(changed.into_iter().map(TreeDelta::Changed));
    out.extend(removed.into_iter().map(TreeDelta::Removed));
    Ok(out)
}

/// Renders a tree diff as `+;<path>` / `~;<path>` / `-;<path>` lines.
pub fn render_tree_diff(deltas: &[TreeDelta]) -> String {
    let mut out = String::new();
    for delta in deltas {
        out.push_str(delta.sigil());
        out.push(';');
        out.push_str(&delta.path().to_string_lossy());
        out.push('\n');
    }
    out
}

/// Diffs two blobs (either may be absent) at the line level, writing
/// decompressed scratch copies under `scratch_dir`. Returns `+;<line>` /
/// `-;<line>` events; unchanged lines are not emitted.
pub fn diff_blobs(
    store: &ObjectStore,
    scratch_dir: &Path,
    blob1: Option<&Oid>,
    blob2: Option<&Oid>,
) -> Result<Vec<LineChange>> {
    std::fs::create_dir_all(scratch_dir)?;

    let read_lines = |id: &Oid, name: &str| -> Result<Vec<String>> {
        let scratch_path = scratch_dir.join(name);
        store.get_blob(id, &scratch_path)?;
        let content = infra::read_file(&scratch_path)?;
        let result = String::from_utf8_lossy(&content)
            .lines()
            .map(|l| l.to_string())
            .collect();
        let _ = std::fs::remove_file(&scratch_path);
        Ok(result)
    };

    let lines1 = match blob1 {
        Some(id) => read_lines(id, "diff-side-1")?,
        None => Vec::new(),
    };
    let lines2 = match blob2 {
        Some(id) => read_lines(id, "diff-side-2")?,
        None => Vec::new(),
    };

    if blob1.is_none() {
        return Ok(lines2.into_iter().map(LineChange::Added).collect());
    }
    if blob2.is_none() {
        return Ok(lines1.into_iter().map(LineChange::Removed).collect());
    }

    Ok(diff_lines(&lines1, &lines2)
        .into_iter()
        .filter(|c| !matches!(c, LineChange::Context(_)))
        .collect())
}

/// Renders line-diff events as `+;<line>` / `-;<line>` text.
pub fn render_line_diff(changes: &[LineChange]) -> String {
    let mut out = String::new();
    for change in changes {
        match change {
            LineChange::Added(line) => {
                out.push_str("+;");
                out.push_str(line);
                out.push('\n');
            }
            LineChange::Removed(line) => {
                out.push_str("-;");
                out.push_str(line);
                out.push('\n');
            }
            LineChange::Context(_) => {}
        }
    }
    out
}

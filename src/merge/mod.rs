//! Merge engine: ancestry walk, fast-forward detection, and two-direction
//! tree overlay with line-level conflict rendering.

pub mod conflict;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::index::{Index, Op};
use crate::objects::{ObjectStore, Oid};

pub use conflict::render_conflict;

/// A single unresolved merge conflict: the path, and the blob id on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub path: PathBuf,
    pub ours: Oid,
    pub theirs: Oid,
}

/// Walks `target`'s parent chain; true if `base` appears on it (or equals
/// it), false if the chain reaches `None` first.
pub fn is_ancestor(store: &ObjectStore, base: &Oid, target: &Oid) -> Result<bool> {
    let mut current = *target;
    loop {
        if current == *base {
            return Ok(true);
        }
        let record = store.get_commit(&current)?;
        match record.parent {
            Some(parent) => current = parent,
            None => return Ok(false),
        }
    }
}

/// Overlays `src` onto `dst`: for every file in `src`'s tree absent from
/// `dst`'s tree, materializes and stages it (no conflict). For every file
/// present in both with differing blob ids, records a conflict without
/// touching the workspace. Returns the recorded conflicts.
///
/// `baseline_tree` is the tree `index.scan` diffs newly-materialized files
/// against to decide whether they're worth staging — always the current
/// commit's tree (`main_tree` at the call site), never `dst_tree`: staging
/// during a merge follows the same baseline `add` always uses, regardless
/// of which tree `dst_tree` happens to be for this overlay direction.
pub fn overlay(
    store: &ObjectStore,
    workspace_root: &Path,
    index: &mut Index,
    src_tree: &Oid,
    dst_tree: &Oid,
    baseline_tree: &Oid,
    seed: u64,
) -> Result<Vec<Conflict>> {
    let mut conflicts = Vec::new();
    for (rel, src_blob) in store.walk_tree(src_tree)? {
        match store.tree_entry(dst_tree, &rel)? {
            None => {
                store.get_blob(&src_blob, &workspace_root.join(&rel))?;
                index.scan(store, workspace_root, &rel, Some(baseline_tree), seed, Op::Add)?;
            }
            Some(dst_blob) if dst_blob != src_blob => {
                conflicts.push(Conflict {
                    path: rel,
                    ours: dst_blob,
                    theirs: src_blob,
                });
            }
            Some(_) => {}
        }
    }
    Ok(conflicts)
}

/// Renders and writes the three-way conflict merge of two blob versions
/// to `workspace_root/rel`, using `scratch_dir` for decompression. Unlike
/// `diff_blobs`, context lines are kept so unconflicted stretches
/// interleave correctly between conflict regions.
pub fn write_conflict_file(
    store: &ObjectStore,
    workspace_root: &Path,
    scratch_dir: &Path,
    rel: &Path,
    ours: &Oid,
    theirs: &Oid,
) -> Result<()> {
    std::fs::create_dir_all(scratch_dir)?;
    let ours_path = scratch_dir.join("conflict-ours");
    let theirs_path = scratch_dir.join("conflict-theirs");
    store.get_blob(ours, &ours_path)?;
    store.get_blob(theirs, &theirs_path)?;

    let read_lines = |p: &Path| -> Result<Vec<String>> {
        let content = crate::infra::read_file(p)?;
        Ok(String::from_utf8_lossy(&content).lines().map(|l| l.to_string()).collect())
    };
    let ours_lines = read_lines(&ours_path)?;
    let theirs_lines = read_lines(&theirs_path)?;
    let _ = std::fs::remove_file(&ours_path);
    let _ = std::fs::remove_file(&theirs_path);

    let changes = crate::diff::diff_lines(&ours_lines, &theirs_lines);
    let rendered = render_conflict(&changes);

    let out_path = workspace_root.join(rel);
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(out_path, rendered)?;
    Ok(())
}

//! Object store: blobs (LZMA-compressed), trees (mirrored directories),
//! and commit records (plain 5-line text), all fanned out under
//! `objects/<id[0:2]>/<id[2:]>`.

use std::fs;
use std::path::{Path, PathBuf};

use super::oid::Oid;
use crate::error::{Error, Result};
use crate::infra::{compression, hash};

/// A parsed commit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// The id of this commit.
    pub id: Oid,
    /// The user who authored the commit.
    pub username: String,
    /// The ISO-like timestamp string, recorded verbatim.
    pub timestamp: String,
    /// The commit message.
    pub description: String,
    /// The tree this commit snapshots.
    pub tree: Oid,
    /// The parent commit, or `None` for the initial commit.
    pub parent: Option<Oid>,
}

/// The content-addressed object store rooted at a repository's `objects/` dir.
#[derive(Debug, Clone)]
pub struct ObjectStore {
    objects_dir: PathBuf,
}

impl ObjectStore {
    /// Creates a store rooted at the given `objects/` directory.
    pub fn new<P: AsRef<Path>>(objects_dir: P) -> Self {
        ObjectStore {
            objects_dir: objects_dir.as_ref().to_path_buf(),
        }
    }

    /// The on-disk path for an object id, under the 2-char fan-out scheme.
    pub fn oid_path(&self, id: &Oid) -> PathBuf {
        let hex = id.to_hex();
        self.objects_dir.join(&hex[..2]).join(&hex[2..])
    }

    /// True if any object (blob, tree, or commit) exists at this id.
    pub fn exists(&self, id: &Oid) -> bool {
        self.oid_path(id).exists()
    }

    /// Compresses the workspace file at `relative_path` and writes it under
    /// `blob_id`, streaming through LZMA rather than buffering the whole
    /// file. A no-op if the object already exists (content-addressed writes
    /// are idempotent).
    pub fn put_blob(&self, workspace_root: &Path, relative_path: &Path, blob_id: &Oid) -> Result<()> {
        let path = self.oid_path(blob_id);
        if path.exists() {
            return Ok(());
        }

        let input_path = workspace_root.join(relative_path);
        let mut input = std::io::BufReader::new(fs::File::open(&input_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::NotFound(input_path.display().to_string())
            } else {
                Error::Io(e)
            }
        })?);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = std::io::BufWriter::new(fs::File::create(&path)?);
        compression::compress_stream(&mut input, &mut output)?;
        Ok(())
    }

    /// Decompresses `blob_id` into `out_path`, creating parent directories,
    /// streaming through LZMA rather than buffering the whole object.
    pub fn get_blob(&self, blob_id: &Oid, out_path: &Path) -> Result<()> {
        let path = self.oid_path(blob_id);
        let mut input = std::io::BufReader::new(fs::File::open(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ObjectNotFound(blob_id.to_hex())
            } else {
                Error::Io(e)
            }
        })?);

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut output = std::io::BufWriter::new(fs::File::create(out_path)?);
        compression::decompress_stream(&mut input, &mut output)?;
        Ok(())
    }

    /// Writes the tree at `tree_id` by copying `prev_tree_id`'s directory
    /// (if any) and then applying `entries` — `(relative_path, blob_id,
    /// is_add)` — on top. ADD writes a plain-text file holding the blob
    /// id's hex string; DEL removes the file. This is the prior-tree-reuse
    /// trick: O(changes) work instead of O(tree size).
    pub fn put_tree<'a>(
        &self,
        tree_id: &Oid,
        prev_tree_id: Option<&Oid>,
        entries: impl Iterator<Item = (&'a Path, &'a Oid, bool)>,
    ) -> Result<()> {
        let tree_dir = self.oid_path(tree_id);
        fs::create_dir_all(&tree_dir)?;

        if let Some(prev_id) = prev_tree_id {
            let prev_dir = self.oid_path(prev_id);
            if prev_dir.exists() {
                copy_dir_recursive(&prev_dir, &tree_dir)?;
            }
        }

        for (rel_path, blob_id, is_add) in entries {
            let entry_path = tree_dir.join(rel_path);
            if is_add {
                if let Some(parent) = entry_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&entry_path, blob_id.to_hex())?;
            } else if entry_path.exists() {
                fs::remove_file(&entry_path)?;
            }
        }

        Ok(())
    }

    /// Enumerates `(relative_path, blob_id)` for every file under `tree_id`,
    /// sorted by path.
    pub fn walk_tree(&self, tree_id: &Oid) -> Result<Vec<(PathBuf, Oid)>> {
        let tree_dir = self.oid_path(tree_id);
        let mut entries = Vec::new();
        if tree_dir.exists() {
            walk_tree_recursive(&tree_dir, &tree_dir, &mut entries)?;
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    /// Looks up a single file's blob id within `tree_id`, without walking
    /// the whole tree. Used by the index to compare against a baseline.
    pub fn tree_entry(&self, tree_id: &Oid, relative_path: &Path) -> Result<Option<Oid>> {
        let entry_path = self.oid_path(tree_id).join(relative_path);
        if !entry_path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&entry_path)?;
        let id = Oid::from_hex(content.trim()).map_err(|_| Error::InvalidObject {
            id: content.trim().to_string(),
            reason: "tree entry does not hold a valid blob id".to_string(),
        })?;
        Ok(Some(id))
    }

    /// Writes a commit record as plain 5-line text (not compressed).
    pub fn put_commit(
        &self,
        id: &Oid,
        username: &str,
        timestamp: &str,
        description: &str,
        tree: &Oid,
        parent: Option<&Oid>,
    ) -> Result<()> {
        let path = self.oid_path(id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let parent_str = parent.map(|p| p.to_hex()).unwrap_or_else(|| "None".to_string());
        let content = format!(
            "{username}\n{timestamp}\n{description}\n{}\n{parent_str}",
            tree.to_hex()
        );
        fs::write(&path, content)?;
        Ok(())
    }

    /// Reads and parses the commit record at `id`.
    pub fn get_commit(&self, id: &Oid) -> Result<CommitRecord> {
        let path = self.oid_path(id);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ObjectNotFound(id.to_hex())
            } else {
                Error::Io(e)
            }
        })?;

        let lines: Vec<&str> = content.splitn(5, '\n').collect();
        if lines.len() != 5 {
            return Err(Error::InvalidObject {
                id: id.to_hex(),
                reason: format!("expected 5 lines, found {}", lines.len()),
            });
        }

        let tree = Oid::from_hex(lines[3]).map_err(|_| Error::InvalidObject {
            id: id.to_hex(),
            reason: format!("invalid tree id: {}", lines[3]),
        })?;

        let parent = if lines[4] == "None" {
            None
        } else {
            Some(Oid::from_hex(lines[4]).map_err(|_| Error::InvalidObject {
                id: id.to_hex(),
                reason: format!("invalid parent id: {}", lines[4]),
            })?)
        };

        Ok(CommitRecord {
            id: *id,
            username: lines[0].to_string(),
            timestamp: lines[1].to_string(),
            description: lines[2].to_string(),
            tree,
            parent,
        })
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if file_type.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn walk_tree_recursive(root: &Path, current: &Path, out: &mut Vec<(PathBuf, Oid)>) -> Result<()> {
    for entry in fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            walk_tree_recursive(root, &path, out)?;
        } else {
            let rel = path
                .strip_prefix(root)
                .map_err(|_| Error::InvalidInput(format!("{} escapes tree root", path.display())))?;
            let content = fs::read_to_string(&path)?;
            let id = Oid::from_hex(content.trim()).map_err(|_| Error::InvalidObject {
                id: content.trim().to_string(),
                reason: "tree entry does not hold a valid blob id".to_string(),
            })?;
            out.push((rel.to_path_buf(), id));
        }
    }
    Ok(())
}

/// Computes the blob id for a workspace file: keyed by its relative path,
/// then its content read in 4 KiB chunks.
pub fn blob_id_for_file(seed: u64, workspace_root: &Path, relative_path: &Path) -> Result<Oid> {
    let abs = workspace_root.join(relative_path);
    let meta = fs::metadata(&abs).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::InvalidInput(format!("not a file: {}", abs.display()))
        } else {
            Error::Io(e)
        }
    })?;
    if !meta.is_file() {
        return Err(Error::InvalidInput(format!("not a file: {}", abs.display())));
    }

    let rel_str = relative_path.to_string_lossy().replace('\\', "/");
    let mut file = fs::File::open(&abs)?;
    let bytes = hash::hash_file(seed, &rel_str, &mut file)?;
    Ok(Oid::from_bytes(bytes))
}

/// Hashes an in-memory string with the repository seed.
pub fn string_id(seed: u64, s: &str) -> Oid {
    Oid::from_bytes(hash::hash_string(seed, s))
}

/// Hashes a tree from blob ids in the given order (already sorted by the
/// index's persistence order).
pub fn tree_id_from_blob_ids<'a>(seed: u64, blob_ids: impl Iterator<Item = &'a Oid>) -> Oid {
    let hexes: Vec<String> = blob_ids.map(|b| b.to_hex()).collect();
    Oid::from_bytes(hash::hash_tree(seed, hexes.iter().map(|s| s.as_str())))
}

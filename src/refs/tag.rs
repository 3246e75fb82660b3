//! Tags: `refs/tags/<name>` files holding 4 lines — user, timestamp,
//! description, commit id (in that order; fixed per the spec's design
//! notes, which flag the source as inconsistent on this grammar).

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::infra::write_file_atomic;
use crate::objects::Oid;

/// A parsed tag record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Who created the tag.
    pub username: String,
    /// When the tag was created.
    pub timestamp: String,
    /// The tag's description/message.
    pub description: String,
    /// The tagged commit.
    pub commit_id: Oid,
}

fn tag_path(repo_path: &Path, name: &str) -> std::path::PathBuf {
    repo_path.join("refs").join("tags").join(name)
}

/// True if a tag named `name` exists.
pub fn exists(repo_path: &Path, name: &str) -> bool {
    tag_path(repo_path, name).exists()
}

/// Creates `refs/tags/<name>`. Fails `AlreadyExists` if the tag already
/// exists.
pub fn create(
    repo_path: &Path,
    name: &str,
    username: &str,
    timestamp: &str,
    description: &str,
    commit_id: &Oid,
) -> Result<()> {
    let path = tag_path(repo_path, name);
    if path.exists() {
        return Err(Error::AlreadyExists(name.to_string()));
    }
    let content = format!("{username}\n{timestamp}\n{description}\n{}", commit_id.to_hex());
    write_file_atomic(&path, content.as_bytes())
}

/// Reads and parses `refs/tags/<name>`.
pub fn read(repo_path: &Path, name: &str) -> Result<TagRecord> {
    let path = tag_path(repo_path, name);
    let content = fs::read_to_string(&path).map_err(|_| Error::NotFound(format!("tag {name}")))?;
    let lines: Vec<&str> = content.splitn(4, '\n').collect();
    if lines.len() != 4 {
        return Err(Error::InvalidInput(format!("malformed tag: {name}")));
    }
    let commit_id = Oid::from_hex(lines[3].trim())
        .map_err(|_| Error::InvalidInput(format!("malformed tag commit id: {name}")))?;
    Ok(TagRecord {
        username: lines[0].to_string(),
        timestamp: lines[1].to_string(),
        description: lines[2].to_string(),
        commit_id,
    })
}

/// Lists tag names, sorted.
pub fn list(repo_path: &Path) -> Result<Vec<String>> {
    let tags_dir = repo_path.join("refs").join("tags");
    let mut names = Vec::new();
    if tags_dir.exists() {
        for entry in fs::read_dir(&tags_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Deletes `refs/tags/<name>`. A no-op if it does not exist.
pub fn delete(repo_path: &Path, name: &str) -> Result<()> {
    let path = tag_path(repo_path, name);
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(&path)?;
    Ok(())
}

//! Branches: `refs/heads/<name>` files holding a single commit id.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::infra::write_file_atomic;
use crate::objects::Oid;

fn branch_path(repo_path: &Path, name: &str) -> std::path::PathBuf {
    repo_path.join("refs").join("heads").join(name)
}

/// True if a branch named `name` exists.
pub fn exists(repo_path: &Path, name: &str) -> bool {
    branch_path(repo_path, name).exists()
}

/// Creates `refs/heads/<name>` pointing at `commit_id`. Fails `AlreadyExists`
/// if the branch already exists.
pub fn create(repo_path: &Path, name: &str, commit_id: &Oid) -> Result<()> {
    let path = branch_path(repo_path, name);
    if path.exists() {
        return Err(Error::AlreadyExists(name.to_string()));
    }
    write_file_atomic(&path, commit_id.to_hex().as_bytes())
}

/// Overwrites `refs/heads/<name>` with `commit_id`. Used to advance a
/// branch tip on commit.
pub fn set_tip(repo_path: &Path, name: &str, commit_id: &Oid) -> Result<()> {
    let path = branch_path(repo_path, name);
    write_file_atomic(&path, commit_id.to_hex().as_bytes())
}

/// Reads the commit id `refs/heads/<name>` points to.
pub fn tip(repo_path: &Path, name: &str) -> Result<Oid> {
    let path = branch_path(repo_path, name);
    let content = fs::read_to_string(&path)
        .map_err(|_| Error::NotFound(format!("branch {name}")))?;
    Oid::from_hex(content.trim())
        .map_err(|_| Error::InvalidInput(format!("malformed branch ref: {name}")))
}

/// Lists branch names, sorted.
pub fn list(repo_path: &Path) -> Result<Vec<String>> {
    let heads_dir = repo_path.join("refs").join("heads");
    let mut names = Vec::new();
    if heads_dir.exists() {
        for entry in fs::read_dir(&heads_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Deletes `refs/heads/<name>`. A no-op if it does not exist.
pub fn delete(repo_path: &Path, name: &str) -> Result<()> {
    let path = branch_path(repo_path, name);
    if !path.exists() {
        return Ok(());
    }
    fs::remove_file(&path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_oid(byte: u8) -> Oid {
        Oid::from_bytes([byte; crate::objects::oid::OID_BYTES])
    }

    #[test]
    fn test_create_and_tip() {
        let temp = TempDir::new().unwrap();
        let oid = sample_oid(1);
        create(temp.path(), "main", &oid).unwrap();
        assert_eq!(tip(temp.path(), "main").unwrap(), oid);
    }

    #[test]
    fn test_create_duplicate_fails() {
        let temp = TempDir::new().unwrap();
        let oid = sample_oid(1);
        create(temp.path(), "main", &oid).unwrap();
        let result = create(temp.path(), "main", &oid);
        assert!(matches!(result, Err(Error::AlreadyExists(_))));
    }

    #[test]
    fn test_set_tip_advances() {
        let temp = TempDir::new().unwrap();
        let oid1 = sample_oid(1);
        let oid2 = sample_oid(2);
        create(temp.path(), "main", &oid1).unwrap();
        set_tip(temp.path(), "main", &oid2).unwrap();
        assert_eq!(tip(temp.path(), "main").unwrap(), oid2);
    }

    #[test]
    fn test_list_sorted() {
        let temp = TempDir::new().unwrap();
        create(temp.path(), "zeta", &sample_oid(1)).unwrap();
        create(temp.path(), "alpha", &sample_oid(2)).unwrap();
        assert_eq!(list(temp.path()).unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        create(temp.path(), "main", &sample_oid(1)).unwrap();
        delete(temp.path(), "main").unwrap();
        assert!(!exists(temp.path(), "main"));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let temp = TempDir::new().unwrap();
        delete(temp.path(), "ghost").unwrap();
    }
}

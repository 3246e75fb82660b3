//! The HEAD pointer: attached to a branch, or detached at a bare commit id.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::infra::write_file_atomic;
use crate::objects::Oid;

const BRANCH_PREFIX: &str = "refs/heads/";

/// HEAD either names a branch ref file (attached) or a bare commit id
/// (detached), matching the design note in the spec: a tagged variant
/// rather than sniffing the string content of the HEAD file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD points at `refs/heads/<name>`.
    Attached(String),
    /// HEAD points directly at a commit.
    Detached(Oid),
}

impl Head {
    /// Reads HEAD from `repo_path/HEAD`.
    pub fn read(repo_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(repo_path.join("HEAD"))?;
        let content = content.trim();

        if let Some(name) = content.strip_prefix(BRANCH_PREFIX) {
            Ok(Head::Attached(name.to_string()))
        } else {
            let oid = Oid::from_hex(content)
                .map_err(|_| Error::InvalidInput(format!("malformed HEAD: {content}")))?;
            Ok(Head::Detached(oid))
        }
    }

    /// Writes this HEAD value to `repo_path/HEAD`.
    pub fn write(&self, repo_path: &Path) -> Result<()> {
        let content = match self {
            Head::Attached(name) => format!("{BRANCH_PREFIX}{name}"),
            Head::Detached(oid) => oid.to_hex(),
        };
        write_file_atomic(repo_path.join("HEAD"), content.as_bytes())
    }

    /// Returns the branch name if attached.
    pub fn branch_name(&self) -> Option<&str> {
        match self {
            Head::Attached(name) => Some(name),
            Head::Detached(_) => None,
        }
    }

    /// True if HEAD is detached.
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_oid() -> Oid {
        Oid::from_bytes([7u8; crate::objects::oid::OID_BYTES])
    }

    #[test]
    fn test_write_then_read_attached() {
        let temp = TempDir::new().unwrap();
        let head = Head::Attached("main".to_string());
        head.write(temp.path()).unwrap();

        let read = Head::read(temp.path()).unwrap();
        assert_eq!(read, head);
        assert_eq!(read.branch_name(), Some("main"));
        assert!(!read.is_detached());
    }

    #[test]
    fn test_write_then_read_detached() {
        let temp = TempDir::new().unwrap();
        let oid = sample_oid();
        let head = Head::Detached(oid);
        head.write(temp.path()).unwrap();

        let read = Head::read(temp.path()).unwrap();
        assert_eq!(read, Head::Detached(oid));
        assert!(read.is_detached());
        assert_eq!(read.branch_name(), None);
    }

    #[test]
    fn test_read_malformed_fails() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("HEAD"), "not-a-valid-head").unwrap();
        let result = Head::read(temp.path());
        assert!(result.is_err());
    }
}

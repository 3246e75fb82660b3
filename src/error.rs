//! Error types for kit.

use std::fmt;
use std::path::PathBuf;

/// The main error type for kit operations.
#[derive(Debug)]
pub enum Error {
    /// An I/O error occurred.
    Io(std::io::Error),

    /// The operation requires an existing repository but none was found.
    RepositoryMissing(PathBuf),

    /// `init` ran against a workspace that already has a repository, or a
    /// branch/tag was created with a name that already exists.
    AlreadyExists(String),

    /// `commit` ran with no staged changes and a prior commit already exists.
    NothingToCommit,

    /// `current_branch` was requested while HEAD is detached.
    NotOnBranch,

    /// `checkout`/`merge` ran without `force` while the index has staged changes.
    UncommittedChanges,

    /// The checkout target (branch, tag, or commit id) does not resolve.
    CheckoutError(String),

    /// A named ref does not exist.
    NotFound(String),

    /// A merge produced conflicts; lists the conflicting relative paths.
    MergeConflict(Vec<PathBuf>),

    /// A malformed object id, unreadable path, or other bad input.
    InvalidInput(String),

    /// An object referenced from a commit or tree could not be found.
    ObjectNotFound(String),

    /// A stored object's on-disk representation is corrupt.
    InvalidObject {
        /// The object id.
        id: String,
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {e}"),
            Error::RepositoryMissing(path) => {
                write!(f, "no repository found at {}", path.display())
            }
            Error::AlreadyExists(what) => write!(f, "already exists: {what}"),
            Error::NothingToCommit => write!(f, "nothing to commit"),
            Error::NotOnBranch => write!(f, "not currently on a branch"),
            Error::UncommittedChanges => write!(f, "uncommitted changes in the index"),
            Error::CheckoutError(name) => write!(f, "no branch, tag, or commit named {name}"),
            Error::NotFound(what) => write!(f, "not found: {what}"),
            Error::MergeConflict(paths) => {
                write!(f, "merge conflict in: ")?;
                for (i, p) in paths.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p.display())?;
                }
                Ok(())
            }
            Error::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Error::ObjectNotFound(id) => write!(f, "object not found: {id}"),
            Error::InvalidObject { id, reason } => {
                write!(f, "invalid object {id}: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for kit operations.
pub type Result<T> = std::result::Result<T, Error>;

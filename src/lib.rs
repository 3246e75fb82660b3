//! # kit
//!
//! A local, file-backed, content-addressed version control engine.
//!
//! `kit` tracks a workspace as a sequence of commits, each snapshotting a
//! tree of content-addressed blobs. Objects are identified by a
//! repository-local keyed hash rather than a portable cryptographic
//! digest, and trees are plain mirrored directories rather than a packed
//! binary format — see [`objects`] for the on-disk model.
//!
//! ## Quick start
//!
//! ```no_run
//! use kit::Repository;
//!
//! fn main() -> kit::Result<()> {
//!     let repo = Repository::init("my-project", "alice")?;
//!     repo.add(std::path::Path::new("README.md"))?;
//!     repo.commit("alice", "initial import")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module overview
//!
//! - [`error`] — error types and the `Result` alias.
//! - [`repository`] — the `Repository` façade: lifecycle, staging,
//!   commit/checkout, refs, and merge.
//! - [`objects`] — content-addressed blobs, trees, and commit records.
//! - [`index`] — the staging area.
//! - [`refs`] — HEAD, branches, and tags.
//! - [`diff`] — tree and line-level diffing.
//! - [`merge`] — ancestry checks and three-way conflict resolution.
//! - [`log`] — commit history traversal.
//! - [`config`] — the optional `.kit/config` file.

pub mod config;
pub mod diff;
pub mod error;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
pub mod refs;
pub mod repository;

// Internal modules (not part of public API)
pub(crate) mod infra;

// Re-export primary types for convenient access
pub use config::Config;
pub use error::{Error, Result};
pub use repository::Repository;

// Re-export object types
pub use objects::{CommitRecord, ObjectStore, Oid};

// Re-export reference types
pub use refs::{Head, TagRecord};

// Re-export index types
pub use index::{Index, Op};

// Re-export diff types
pub use diff::{LineChange, TreeDelta};

// Re-export merge types
pub use merge::Conflict;

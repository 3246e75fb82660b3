//! Content-addressed object types: ids, the object store, and commit records.

pub mod oid;
pub mod store;

pub use oid::Oid;
pub use store::{blob_id_for_file, string_id, tree_id_from_blob_ids, CommitRecord, ObjectStore};

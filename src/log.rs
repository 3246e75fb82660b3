//! Commit history traversal: walks the parent chain from a starting
//! commit back to the literal `"None"` sentinel.

use crate::error::Result;
use crate::objects::{CommitRecord, ObjectStore, Oid};

/// Walks the parent chain starting at `start`, newest first, stopping at
/// the root commit or after `limit` entries (whichever comes first).
pub fn walk(store: &ObjectStore, start: Oid, limit: Option<usize>) -> Result<Vec<CommitRecord>> {
    let mut out = Vec::new();
    let mut current = Some(start);

    while let Some(id) = current {
        if let Some(limit) = limit {
            if out.len() >= limit {
                break;
            }
        }

        let record = store.get_commit(&id)?;
        current = record.parent;
        out.push(record);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn sample_oid(byte: u8) -> Oid {
        Oid::from_bytes([byte; crate::objects::oid::OID_BYTES])
    }

    fn store_with_chain(dir: &Path) -> (ObjectStore, Oid, Oid, Oid) {
        let store = ObjectStore::new(dir.join("objects"));
        let tree = sample_oid(0xff);
        let root = sample_oid(1);
        let mid = sample_oid(2);
        let tip = sample_oid(3);
        store.put_commit(&root, "a", "t1", "root", &tree, None).unwrap();
        store.put_commit(&mid, "a", "t2", "mid", &tree, Some(&root)).unwrap();
        store.put_commit(&tip, "a", "t3", "tip", &tree, Some(&mid)).unwrap();
        (store, root, mid, tip)
    }

    #[test]
    fn test_walk_full_chain_newest_first() {
        let temp = TempDir::new().unwrap();
        let (store, root, mid, tip) = store_with_chain(temp.path());

        let commits = walk(&store, tip, None).unwrap();
        let ids: Vec<Oid> = commits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![tip, mid, root]);
    }

    #[test]
    fn test_walk_respects_limit() {
        let temp = TempDir::new().unwrap();
        let (store, _root, mid, tip) = store_with_chain(temp.path());

        let commits = walk(&store, tip, Some(2)).unwrap();
        let ids: Vec<Oid> = commits.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![tip, mid]);
    }

    #[test]
    fn test_walk_single_commit_no_parent() {
        let temp = TempDir::new().unwrap();
        let (store, root, _mid, _tip) = store_with_chain(temp.path());

        let commits = walk(&store, root, None).unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].id, root);
    }
}

//! References: HEAD, branches (`refs/heads/`), and tags (`refs/tags/`).

pub mod branch;
pub mod head;
pub mod tag;

pub use head::Head;
pub use tag::TagRecord;

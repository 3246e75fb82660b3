//! Line-level diffing via a longest-common-subsequence backtrace.

/// One event in a line-level diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineChange {
    /// Present in both sides, unchanged.
    Context(String),
    /// Present only in the second side.
    Added(String),
    /// Present only in the first side.
    Removed(String),
}

/// Diffs two line sequences, producing a stream of `Context`/`Added`/
/// `Removed` events via a classic LCS table and backtrace.
pub fn diff_lines(old: &[String], new: &[String]) -> Vec<LineChange> {
    let n = old.len();
    let m = new.len();

    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if old[i] == new[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut out = Vec::with_capacity(n + m);
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if old[i] == new[j] {
            out.push(LineChange::Context(old[i].clone()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            out.push(LineChange::Removed(old[i].clone()));
            i += 1;
        } else {
            out.push(LineChange::Added(new[j].clone()));
            j += 1;
        }
    }
    while i < n {
        out.push(LineChange::Removed(old[i].clone()));
        i += 1;
    }
    while j < m {
        out.push(LineChange::Added(new[j].clone()));
        j += 1;
    }
    out
}

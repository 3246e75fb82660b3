//! Three-way conflict rendering over a line-level diff.

use crate::diff::LineChange;

/// Renders a line diff (ours vs. theirs) as text with `<<<<<<< YOURS` /
/// `=======` / `>>>>>>> THEIRS` conflict regions wrapped around the
/// removed/added stretches, context lines emitted verbatim.
pub fn render_conflict(changes: &[LineChange]) -> String {
    let mut out = String::new();
    let mut yours: Vec<&str> = Vec::new();
    let mut theirs: Vec<&str> = Vec::new();
    let mut open = false;

    let close_region = |out: &mut String, yours: &mut Vec<&str>, theirs: &mut Vec<&str>| {
        out.push_str("<<<<<<< YOURS\n");
        for line in yours.drain(..) {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str("=======\n");
        for line in theirs.drain(..) {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(">>>>>>> THEIRS\n");
    };

    for change in changes {
        match change {
            LineChange::Context(line) => {
                if open {
                    close_region(&mut out, &mut yours, &mut theirs);
                    open = false;
                }
                out.push_str(line);
                out.push('\n');
            }
            LineChange::Removed(line) => {
                open = true;
                yours.push(line);
            }
            LineChange::Added(line) => {
                open = true;
                theirs.push(line);
            }
        }
    }
    if open {
        close_region(&mut out, &mut yours, &mut theirs);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> LineChange {
        LineChange::Context(s.to_string())
    }
    fn r(s: &str) -> LineChange {
        LineChange::Removed(s.to_string())
    }
    fn a(s: &str) -> LineChange {
        LineChange::Added(s.to_string())
    }

    #[test]
    fn test_no_conflict_is_plain_text() {
        let changes = vec![c("one"), c("two")];
        assert_eq!(render_conflict(&changes), "one\ntwo\n");
    }

    #[test]
    fn test_single_conflict_region() {
        let changes = vec![c("before"), r("mine"), a("theirs"), c("after")];
        let rendered = render_conflict(&changes);
        assert_eq!(
            rendered,
            "before\n<<<<<<< YOURS\nmine\n=======\ntheirs\n>>>>>>> THEIRS\nafter\n"
        );
    }

    #[test]
    fn test_trailing_open_region_is_closed() {
        let changes = vec![c("before"), r("mine")];
        let rendered = render_conflict(&changes);
        assert_eq!(rendered, "before\n<<<<<<< YOURS\nmine\n=======\n>>>>>>> THEIRS\n");
    }

    #[test]
    fn test_multiple_separate_regions() {
        let changes = vec![r("a1"), a("a2"), c("mid"), r("b1"), a("b2")];
        let rendered = render_conflict(&changes);
        assert_eq!(
            rendered,
            "<<<<<<< YOURS\na1\n=======\na2\n>>>>>>> THEIRS\nmid\n<<<<<<< YOURS\nb1\n=======\nb2\n>>>>>>> THEIRS\n"
        );
    }
}

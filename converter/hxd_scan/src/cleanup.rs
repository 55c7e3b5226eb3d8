//! Lexical preprocessor.
//!
//! Transforms raw source into a cleaned text of identical line structure
//! and extracts comments along the way:
//!
//! - `//` to end of line and non-nesting `/* ... */` comments are blanked
//!   out character by character; line breaks inside them are preserved so
//!   line numbers stay stable.
//! - An open-angle-bracket counter tracks `<`/`>` outside comments; while
//!   it is positive, whitespace is deleted, so generic parameter lists
//!   reach the scanner as a single unbroken run. `->` is copied
//!   atomically so its `>` never touches the counter.
//!
//! The first `*/` always closes a block comment, even inside a string
//! literal written in the comment. Accepted limitation.

use hxd_ir::Comment;

/// Result of preprocessing: cleaned text plus extracted comments in
/// source order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CleanOutput {
    pub text: String,
    pub comments: Vec<Comment>,
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Mode {
    Code,
    SingleLine,
    Block,
}

/// Blank out comments, collapse generic-bracket whitespace, and collect
/// comment bodies with the line they ended on.
pub fn clean_source(input: &str) -> CleanOutput {
    let mut out = String::with_capacity(input.len());
    let mut comments = Vec::new();
    let mut raw = String::new();
    let mut mode = Mode::Code;
    let mut open_angles: usize = 0;
    // 1-based line count of `out`; bumped on every newline we emit.
    let mut line: usize = 1;
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];
        let Some(ch) = rest.chars().next() else { break };

        match mode {
            Mode::SingleLine => {
                if ch == '\n' {
                    mode = Mode::Code;
                    comments.push(Comment::single_line(reflow_comment(&raw), line));
                    raw.clear();
                    out.push('\n');
                    line += 1;
                    i += 1;
                } else {
                    raw.push(ch);
                    out.push(' ');
                    i += ch.len_utf8();
                }
            }
            Mode::Block => {
                if rest.starts_with("*/") {
                    mode = Mode::Code;
                    comments.push(Comment::block(reflow_comment(&raw), line));
                    raw.clear();
                    out.push_str("  ");
                    i += 2;
                } else {
                    raw.push(ch);
                    if ch == '\n' {
                        out.push('\n');
                        line += 1;
                    } else {
                        out.push(' ');
                    }
                    i += ch.len_utf8();
                }
            }
            Mode::Code => {
                if rest.starts_with("->") {
                    out.push_str("->");
                    i += 2;
                } else if ch == '<' {
                    open_angles += 1;
                    out.push('<');
                    i += 1;
                } else if ch == '>' {
                    open_angles = open_angles.saturating_sub(1);
                    out.push('>');
                    i += 1;
                } else if rest.starts_with("//") {
                    mode = Mode::SingleLine;
                    out.push_str("  ");
                    i += 2;
                } else if rest.starts_with("/*") {
                    mode = Mode::Block;
                    out.push_str("  ");
                    i += 2;
                } else if ch.is_whitespace() {
                    if open_angles == 0 {
                        out.push(ch);
                        if ch == '\n' {
                            line += 1;
                        }
                    }
                    i += ch.len_utf8();
                } else {
                    out.push(ch);
                    i += ch.len_utf8();
                }
            }
        }
    }

    // A comment left open at EOF is dropped, matching the scanner's
    // overall skip-don't-fail policy.
    CleanOutput {
        text: out,
        comments,
    }
}

/// Reflow a raw comment body into display text.
///
/// Tabs become four spaces, carriage returns are dropped, the common
/// leading run of whitespace and `*` (measured on lines that have any
/// other content) is stripped from every line, leading blank lines are
/// skipped and trailing whitespace is trimmed.
fn reflow_comment(raw: &str) -> String {
    let normalized = raw.replace('\t', "    ").replace('\r', "");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let mut lowest_indent = usize::MAX;
    for line in &lines {
        let marker_run = line
            .chars()
            .take_while(|c| c.is_whitespace() || *c == '*')
            .map(char::len_utf8)
            .sum::<usize>();
        if !line[marker_run..].trim().is_empty() && marker_run < lowest_indent {
            lowest_indent = marker_run;
        }
    }
    if lowest_indent == usize::MAX {
        lowest_indent = 0;
    }

    let mut result: Vec<&str> = Vec::new();
    for line in &lines {
        let stripped = strip_leading_markers(line, lowest_indent);
        if !result.is_empty() || !stripped.trim().is_empty() {
            result.push(stripped);
        }
    }

    result.join("\n").trim_end().to_string()
}

/// Strip up to `limit` bytes of leading whitespace/`*` from a comment
/// line. The cut always lands on a character boundary, so a line whose
/// leading whitespace is multibyte (U+3000 and friends) never splits a
/// code point.
fn strip_leading_markers(line: &str, limit: usize) -> &str {
    let mut cut = 0;
    for c in line.chars() {
        if cut >= limit || !(c.is_whitespace() || c == '*') {
            break;
        }
        cut += c.len_utf8();
    }
    &line[cut..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_comment_blanked_newline_kept() {
        let out = clean_source("var x; // trailing\nvar y;");
        assert_eq!(out.text, "var x;            \nvar y;");
        assert_eq!(out.comments.len(), 1);
        assert_eq!(out.comments[0].text, "trailing");
        assert_eq!(out.comments[0].line, 1);
        assert!(!out.comments[0].multiline);
    }

    #[test]
    fn block_comment_preserves_line_structure() {
        let out = clean_source("a /* one\ntwo */ b");
        assert_eq!(out.text, "a       \n       b");
        assert_eq!(out.comments.len(), 1);
        assert!(out.comments[0].multiline);
        // The comment ends on line 2 of the cleaned text.
        assert_eq!(out.comments[0].line, 2);
    }

    #[test]
    fn doc_block_reflow_strips_stars_and_indent() {
        let out = clean_source("/**\n * Hello\n * World\n */\nclass A {}");
        assert_eq!(out.comments[0].text, "Hello\nWorld");
    }

    #[test]
    fn one_line_doc_block() {
        let out = clean_source("/** Hello */");
        assert_eq!(out.comments[0].text, "Hello");
    }

    #[test]
    fn generic_whitespace_is_deleted() {
        let out = clean_source("Map< String , Array<Int> >");
        assert_eq!(out.text, "Map<String,Array<Int>>");
    }

    #[test]
    fn arrow_does_not_close_angle_run() {
        // The `>` of `->` must not decrement the angle counter, so the
        // space after the arrow type is still deleted.
        let out = clean_source("Map<Int, Void->Int >");
        assert_eq!(out.text, "Map<Int,Void->Int>");
    }

    #[test]
    fn stray_close_angle_floors_at_zero() {
        let out = clean_source("a > b < c >");
        assert_eq!(out.text, "a > b <c>");
    }

    #[test]
    fn unterminated_block_comment_is_dropped() {
        let out = clean_source("code /* never closed");
        assert_eq!(out.text.trim_end(), "code");
        assert!(out.comments.is_empty());
    }

    #[test]
    fn comment_close_marker_inside_string_still_closes() {
        // Accepted limitation: string contents are not protected while
        // scanning for the closing marker.
        let out = clean_source("/* \"*/\" */");
        assert_eq!(out.comments.len(), 1);
        assert_eq!(out.comments[0].text, "\"");
    }

    #[test]
    fn multibyte_whitespace_line_reflows_without_splitting() {
        // The common-indent cut must stay on character boundaries even
        // when a line leads with ideographic space.
        let out = clean_source("/* x\n\u{3000}\n*/\nclass A {}");
        assert_eq!(out.comments.len(), 1);
        assert_eq!(out.comments[0].text, "x");
    }

    #[test]
    fn tabs_expand_in_comment_text() {
        let out = clean_source("//\tindented\n");
        assert_eq!(out.comments[0].text, "indented");
    }
}

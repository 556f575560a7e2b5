//! Comment scanning.
//!
//! Comments are not part of the AST, so pragmas have to be read back out of
//! the source text. Only the comment block that leads the file matters for
//! `@jsx`-style pragmas.

use serde::{Deserialize, Serialize};

/// A range representing a comment in the source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRange {
    /// Start position (byte offset)
    pub pos: u32,
    /// End position (byte offset)
    pub end: u32,
    pub is_multi_line: bool,
    pub has_trailing_new_line: bool,
}

impl CommentRange {
    pub fn new(pos: u32, end: u32, is_multi_line: bool, has_trailing_new_line: bool) -> Self {
        CommentRange {
            pos,
            end,
            is_multi_line,
            has_trailing_new_line,
        }
    }

    /// Get the comment text from source, delimiters included.
    pub fn get_text<'a>(&self, source: &'a str) -> &'a str {
        let start = self.pos as usize;
        let end = self.end as usize;
        source.get(start..end).unwrap_or("")
    }

    /// Get the comment body with `//`, `/*` and `*/` stripped.
    pub fn get_body<'a>(&self, source: &'a str) -> &'a str {
        let text = self.get_text(source);
        if self.is_multi_line {
            let inner = text.strip_prefix("/*").unwrap_or(text);
            inner.strip_suffix("*/").unwrap_or(inner)
        } else {
            text.strip_prefix("//").unwrap_or(text)
        }
    }
}

/// Collect the comments that precede the first token at or after `pos`.
///
/// Scanning stops at the first character that is neither whitespace nor part
/// of a comment. A leading `#!` line is skipped when `pos` is 0.
pub fn get_leading_comment_ranges(source: &str, pos: u32) -> Vec<CommentRange> {
    let mut comments = Vec::new();
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut pos = pos as usize;

    if pos == 0 && bytes.starts_with(b"#!") {
        while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
            pos += 1;
        }
    }

    while pos < len {
        let ch = bytes[pos];

        if ch == b' ' || ch == b'\t' || ch == b'\r' || ch == b'\n' || ch == 0x0b || ch == 0x0c {
            pos += 1;
            continue;
        }

        if ch != b'/' || pos + 1 >= len {
            break;
        }

        match bytes[pos + 1] {
            b'/' => {
                let start = pos as u32;
                pos += 2;
                while pos < len && bytes[pos] != b'\n' && bytes[pos] != b'\r' {
                    pos += 1;
                }
                let has_trailing_new_line = pos < len;
                comments.push(CommentRange::new(start, pos as u32, false, has_trailing_new_line));
            }
            b'*' => {
                let start = pos as u32;
                pos += 2;
                let mut closed = false;
                while pos + 1 < len {
                    if bytes[pos] == b'*' && bytes[pos + 1] == b'/' {
                        pos += 2;
                        closed = true;
                        break;
                    }
                    pos += 1;
                }
                if !closed {
                    pos = len;
                }
                let has_trailing_new_line =
                    pos < len && (bytes[pos] == b'\n' || bytes[pos] == b'\r');
                comments.push(CommentRange::new(start, pos as u32, true, has_trailing_new_line));
            }
            _ => break,
        }
    }

    comments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_first_token() {
        let source = "/* a */\n// b\nconst x = 1; // c";
        let ranges = get_leading_comment_ranges(source, 0);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].get_body(source), " a ");
        assert_eq!(ranges[1].get_body(source), " b");
        assert!(ranges[1].has_trailing_new_line);
    }

    #[test]
    fn skips_shebang() {
        let source = "#!/usr/bin/env node\n/** @jsx h */\nfoo";
        let ranges = get_leading_comment_ranges(source, 0);
        assert_eq!(ranges.len(), 1);
        assert!(ranges[0].is_multi_line);
    }

    #[test]
    fn unterminated_block_runs_to_end() {
        let source = "/* never closed";
        let ranges = get_leading_comment_ranges(source, 0);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].end as usize, source.len());
    }
}

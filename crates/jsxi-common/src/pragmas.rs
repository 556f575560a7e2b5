//! JSX pragma extraction.
//!
//! Recognised pragmas (in the leading comments of a file):
//!
//! | pragma | meaning |
//! |--------|---------|
//! | `@jsx <entity>` | factory / namespace override for the namespace strategy |
//! | `@jsxfrag <entity>` / `@jsxFrag` | fragment factory override |
//! | `@jsx-intrinsic-factory <entity>` | factory for the generic strategy |
//! | `@jsx-mode react\|generic` | per-file strategy override |
//! | `@jsxImportSource <module>` | runtime module for the automatic runtime |
//!
//! Only the first whitespace-delimited word after the pragma name is taken;
//! the first occurrence of each pragma wins.

use crate::comments::get_leading_comment_ranges;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pragma argument together with the span of the comment it came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PragmaValue {
    pub value: String,
    pub pos: u32,
    pub end: u32,
}

/// All JSX-related pragmas found in one file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsxPragmas {
    pub jsx: Option<PragmaValue>,
    pub jsx_frag: Option<PragmaValue>,
    pub jsx_intrinsic_factory: Option<PragmaValue>,
    pub jsx_mode: Option<PragmaValue>,
    pub jsx_import_source: Option<PragmaValue>,
}

impl JsxPragmas {
    /// Scan the leading comments of `source` for JSX pragmas.
    pub fn extract(source: &str) -> Self {
        let mut pragmas = JsxPragmas::default();
        for range in get_leading_comment_ranges(source, 0) {
            let body = range.get_body(source);
            for line in body.lines() {
                let mut rest = line;
                while let Some(at) = rest.find('@') {
                    let after = &rest[at + 1..];
                    let name_len = after
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after.len());
                    let name = &after[..name_len];
                    let argument = after[name_len..]
                        .split_whitespace()
                        .next()
                        .map(|arg| arg.trim_end_matches("*/"))
                        .filter(|arg| !arg.is_empty() && !arg.starts_with('@'));
                    if let Some(argument) = argument {
                        let value = PragmaValue {
                            value: argument.to_string(),
                            pos: range.pos,
                            end: range.end,
                        };
                        pragmas.record(name, value);
                    }
                    rest = &after[name_len..];
                }
            }
        }
        pragmas
    }

    fn record(&mut self, name: &str, value: PragmaValue) {
        let slot = match name {
            "jsx" => &mut self.jsx,
            "jsxfrag" | "jsxFrag" => &mut self.jsx_frag,
            "jsx-intrinsic-factory" => &mut self.jsx_intrinsic_factory,
            "jsx-mode" => &mut self.jsx_mode,
            "jsxImportSource" | "jsximportsource" => &mut self.jsx_import_source,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }
}

/// A dotted entity name such as `React.createElement` or `$JD.h`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityName {
    parts: Vec<String>,
}

impl EntityName {
    /// Parse an identifier or a qualified name. Returns `None` when any part
    /// is not a valid identifier.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let parts: Vec<String> = text.split('.').map(str::to_string).collect();
        if parts.iter().all(|part| is_identifier_text(part)) {
            Some(EntityName { parts })
        } else {
            None
        }
    }

    pub fn from_identifier(name: impl Into<String>) -> Self {
        EntityName {
            parts: vec![name.into()],
        }
    }

    /// The leftmost identifier (`React` in `React.createElement`).
    pub fn first(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or("")
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Append a member name: `React` + `Fragment` -> `React.Fragment`.
    #[must_use]
    pub fn with_member(&self, member: &str) -> Self {
        let mut parts = self.parts.clone();
        parts.push(member.to_string());
        EntityName { parts }
    }
}

impl fmt::Display for EntityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

/// Whether `text` is a valid ECMAScript identifier name.
pub fn is_identifier_text(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    is_identifier_start(first) && chars.all(is_identifier_part)
}

pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_alphabetic()
}

pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_numeric() || ch == '\u{200c}' || ch == '\u{200d}'
}

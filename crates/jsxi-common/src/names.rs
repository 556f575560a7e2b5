//! Escaped identifier names.
//!
//! Symbol tables key names in "escaped" form: a name that already starts with
//! two underscores gets a third one so that it cannot collide with internal
//! names such as `__call` or `__index`.

/// Escape a user-visible name for use as a symbol-table key.
pub fn escape_leading_underscores(name: &str) -> String {
    if name.starts_with("__") {
        format!("_{name}")
    } else {
        name.to_string()
    }
}

/// Reverse of [`escape_leading_underscores`].
pub fn unescape_leading_underscores(escaped: &str) -> &str {
    if escaped.starts_with("___") {
        &escaped[1..]
    } else {
        escaped
    }
}

/// Whether a JSX tag name denotes an intrinsic element.
///
/// Intrinsic tags start with a lower-case ASCII letter or contain a dash.
pub fn is_intrinsic_jsx_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) || name.contains('-')
}

/// Hyphenated attribute names (`data-foo`, `aria-label`) are never excess-checked.
pub fn is_hyphenated_jsx_name(name: &str) -> bool {
    name.contains('-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaping_round_trips() {
        assert_eq!(escape_leading_underscores("__proto"), "___proto");
        assert_eq!(escape_leading_underscores("_x"), "_x");
        assert_eq!(unescape_leading_underscores("___proto"), "__proto");
        assert_eq!(unescape_leading_underscores("div"), "div");
    }

    #[test]
    fn intrinsic_names() {
        assert!(is_intrinsic_jsx_name("div"));
        assert!(is_intrinsic_jsx_name("my-element"));
        assert!(!is_intrinsic_jsx_name("Div"));
        assert!(!is_intrinsic_jsx_name("_private"));
    }
}

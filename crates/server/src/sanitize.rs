//! Input sanitization for user-supplied strings.
//!
//! Every user-supplied string used as a store lookup value passes through
//! [`scrub`] first. All SQL in this crate uses bound parameters, so operator
//! injection cannot reach the query layer; the scrub step additionally keeps
//! NUL bytes and other control characters out of stored and compared values.

/// Strip control characters (including NUL) from user input.
///
/// Printable text, spaces and all non-control Unicode pass through
/// unchanged.
#[must_use]
pub fn scrub(input: &str) -> String {
    input.chars().filter(|c| !c.is_control()).collect()
}

/// Scrub an optional filter value, treating empty results as absent.
///
/// Query-string filters are only applied when non-empty, matching the form
/// semantics of an unfilled filter field.
#[must_use]
pub fn scrub_filter(input: Option<String>) -> Option<String> {
    input.map(|s| scrub(&s)).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrub_passes_plain_text() {
        assert_eq!(scrub("The Left Hand of Darkness"), "The Left Hand of Darkness");
    }

    #[test]
    fn test_scrub_strips_nul_and_control() {
        assert_eq!(scrub("bad\0input"), "badinput");
        assert_eq!(scrub("line\nbreak\ttab"), "linebreaktab");
    }

    #[test]
    fn test_scrub_keeps_unicode() {
        assert_eq!(scrub("Cien años de soledad"), "Cien años de soledad");
    }

    #[test]
    fn test_scrub_filter_empty_is_absent() {
        assert_eq!(scrub_filter(None), None);
        assert_eq!(scrub_filter(Some(String::new())), None);
        assert_eq!(scrub_filter(Some("\0".to_string())), None);
        assert_eq!(scrub_filter(Some("Dune".to_string())), Some("Dune".to_string()));
    }
}

//! URL string canonicalization used for comparison and deduplication.
//!
//! None of these functions parse or validate URLs. They operate on the raw
//! string with literal, case-sensitive prefix and suffix rules.

use std::borrow::Cow;

const FORWARD_SLASH: char = '/';

/// Drop a leading `https://`, then a leading `http://`.
///
/// Each prefix is removed at most once and only at the start of the string.
///
/// ```
/// use sitemap_core::normalize::strip_scheme;
///
/// assert_eq!(strip_scheme("https://a.com/x"), "a.com/x");
/// assert_eq!(strip_scheme("http://a.com"), "a.com");
/// assert_eq!(strip_scheme("HTTP://a.com"), "HTTP://a.com");
/// ```
#[must_use]
pub fn strip_scheme(url: &str) -> &str {
    let url = url.strip_prefix("https://").unwrap_or(url);
    url.strip_prefix("http://").unwrap_or(url)
}

/// Remove every trailing `/`.
#[must_use]
pub fn trim_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches(FORWARD_SLASH)
}

/// Key used to match URLs when omitting entries.
///
/// The scheme is stripped, then all trailing slashes are trimmed and, when
/// `add_trailing_slash` is set, exactly one is appended.
///
/// ```
/// use sitemap_core::normalize::comparison_key;
///
/// assert_eq!(comparison_key("http://a.com", true), "a.com/");
/// assert_eq!(comparison_key("https://a.com///", true), "a.com/");
/// assert_eq!(comparison_key("https://a.com///", false), "a.com");
/// ```
#[must_use]
pub fn comparison_key(url: &str, add_trailing_slash: bool) -> String {
    let trimmed = trim_trailing_slashes(strip_scheme(url));
    if add_trailing_slash {
        let mut key = String::with_capacity(trimmed.len() + 1);
        key.push_str(trimmed);
        key.push(FORWARD_SLASH);
        key
    } else {
        trimmed.to_string()
    }
}

/// Trailing-slash policy applied to stored URLs when duplicates are removed.
///
/// Without `add_trailing_slash` every trailing slash is stripped. With it, a
/// slash is appended only when the URL does not already end with one, so
/// `a.com//` is left untouched.
///
/// ```
/// use sitemap_core::normalize::canonical_trailing_slash;
///
/// assert_eq!(canonical_trailing_slash("https://a.com//", false), "https://a.com");
/// assert_eq!(canonical_trailing_slash("https://a.com", true), "https://a.com/");
/// assert_eq!(canonical_trailing_slash("https://a.com//", true), "https://a.com//");
/// ```
#[must_use]
pub fn canonical_trailing_slash(url: &str, add_trailing_slash: bool) -> Cow<'_, str> {
    if add_trailing_slash {
        if url.ends_with(FORWARD_SLASH) {
            Cow::Borrowed(url)
        } else {
            Cow::Owned(format!("{url}{FORWARD_SLASH}"))
        }
    } else {
        Cow::Borrowed(trim_trailing_slashes(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_strip_scheme_removes_each_prefix_once() {
        assert_eq!(strip_scheme("https://https://a.com"), "https://a.com");
        assert_eq!(strip_scheme("https://http://a.com"), "a.com");
        assert_eq!(strip_scheme("http://http://a.com"), "http://a.com");
    }

    #[test]
    fn test_strip_scheme_only_touches_the_start() {
        assert_eq!(
            strip_scheme("a.com/redirect?to=https://b.com"),
            "a.com/redirect?to=https://b.com"
        );
        assert_eq!(strip_scheme("ftp://a.com"), "ftp://a.com");
        assert_eq!(strip_scheme(""), "");
    }

    #[test]
    fn test_trim_trailing_slashes() {
        assert_eq!(trim_trailing_slashes("a.com///"), "a.com");
        assert_eq!(trim_trailing_slashes("///"), "");
        assert_eq!(trim_trailing_slashes("a.com/x"), "a.com/x");
    }

    #[test]
    fn test_comparison_key_for_empty_and_root() {
        assert_eq!(comparison_key("", true), "/");
        assert_eq!(comparison_key("", false), "");
        assert_eq!(comparison_key("https://", false), "");
    }

    #[test]
    fn test_canonical_trailing_slash_borrows_when_unchanged() {
        assert!(matches!(
            canonical_trailing_slash("https://a.com/", true),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            canonical_trailing_slash("https://a.com", true),
            Cow::Owned(_)
        ));
    }

    proptest! {
        #[test]
        fn test_comparison_key_is_idempotent(url in r"(https?://)?[a-z./]{0,24}", slash in any::<bool>()) {
            let once = comparison_key(&url, slash);
            let twice = comparison_key(&once, slash);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_canonical_without_slash_never_ends_with_slash(url in r"[a-z:/.]{0,24}") {
            prop_assert!(!canonical_trailing_slash(&url, false).ends_with('/'));
        }

        #[test]
        fn test_canonical_with_slash_always_ends_with_slash(url in r"[a-z:/.]{0,24}") {
            prop_assert!(canonical_trailing_slash(&url, true).ends_with('/'));
        }
    }
}

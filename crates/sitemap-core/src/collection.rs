//! Ordered, duplicate-suppressing storage for sitemap tags.
//!
//! [`TagCollection`] enforces only structural uniqueness on insert: two tags
//! that are equal in every field never coexist, but tags sharing a URL with
//! different metadata do. URL uniqueness is applied later, when the sitemap
//! is prepared for rendering (see [`TagCollection::unique_by_url`]).

use crate::normalize::{canonical_trailing_slash, comparison_key};
use crate::{Tag, Url};
use std::collections::HashSet;
use tracing::debug;

/// Tags in insertion order, with value-equal duplicates suppressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagCollection {
    tags: Vec<Tag>,
}

impl TagCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Insert a tag unless a value-equal tag is already present.
    ///
    /// Returns `true` when the tag was inserted.
    pub fn add(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            debug!(url = %tag.url(), kind = %tag.kind(), "Ignoring duplicate tag");
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// First url-kind tag, in current order, whose URL equals `url` exactly.
    #[must_use]
    pub fn get_url(&self, url: &str) -> Option<&Url> {
        self.tags
            .iter()
            .filter_map(Tag::as_url)
            .find(|tag| tag.url == url)
    }

    /// Mutable form of [`Self::get_url`].
    pub fn get_url_mut(&mut self, url: &str) -> Option<&mut Url> {
        self.tags
            .iter_mut()
            .filter_map(Tag::as_url_mut)
            .find(|tag| tag.url == url)
    }

    /// Whether a url-kind tag with exactly this URL exists.
    #[must_use]
    pub fn has_url(&self, url: &str) -> bool {
        self.get_url(url).is_some()
    }

    /// Remove url-kind tags matching any of `urls` after normalization.
    ///
    /// Both sides are compared through [`comparison_key`]: scheme stripped and
    /// trailing slashes canonicalized according to `add_trailing_slash`. Tags of
    /// other kinds are kept. Returns the number of removed tags.
    pub fn omit_urls<I, S>(&mut self, urls: I, add_trailing_slash: bool) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let targets: HashSet<String> = urls
            .into_iter()
            .map(|url| comparison_key(url.as_ref(), add_trailing_slash))
            .collect();
        if targets.is_empty() {
            return 0;
        }

        let before = self.tags.len();
        self.tags.retain(|tag| {
            !(tag.is_url() && targets.contains(&comparison_key(tag.url(), add_trailing_slash)))
        });
        let removed = before - self.tags.len();
        debug!(removed, remaining = self.tags.len(), "Omitted urls");
        removed
    }

    /// Sort tags by their total order (URL first).
    pub fn sort(&mut self) {
        self.tags.sort();
    }

    /// Rewrite every stored URL with the trailing-slash policy.
    ///
    /// Applies to tags of every kind.
    pub fn normalize_trailing_slashes(&mut self, add_trailing_slash: bool) {
        for tag in &mut self.tags {
            let url = tag.url_mut();
            let canonical = canonical_trailing_slash(url.as_str(), add_trailing_slash);
            if canonical.as_ref() != url.as_str() {
                *url = canonical.into_owned();
            }
        }
    }

    /// Drop tags that are value-equal to an earlier tag, keeping order.
    ///
    /// Returns the number of removed tags.
    pub fn dedup_structural(&mut self) -> usize {
        let before = self.tags.len();
        let mut seen: HashSet<Tag> = HashSet::with_capacity(before);
        self.tags.retain(|tag| seen.insert(tag.clone()));
        before - self.tags.len()
    }

    /// The first tag for each distinct URL, in current order.
    ///
    /// Compares the URL field only, across tag kinds.
    #[must_use]
    pub fn unique_by_url(&self) -> Vec<&Tag> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.tags.len());
        self.tags
            .iter()
            .filter(|&tag| seen.insert(tag.url()))
            .collect()
    }

    /// Iterate over tags in current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    /// Number of stored tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Whether the collection holds no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Stored tags as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Tag] {
        &self.tags
    }

    /// Consume the collection, returning its tags.
    #[must_use]
    pub fn into_vec(self) -> Vec<Tag> {
        self.tags
    }
}

impl<'a> IntoIterator for &'a TagCollection {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Into<Tag>> FromIterator<T> for TagCollection {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self::new();
        for tag in iter {
            collection.add(tag.into());
        }
        collection
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Alternate, ChangeFrequency};
    use proptest::prelude::*;

    fn urls(collection: &TagCollection) -> Vec<&str> {
        collection.iter().map(Tag::url).collect()
    }

    #[test]
    fn test_add_ignores_value_equal_tags() {
        let mut collection = TagCollection::new();
        assert!(collection.add("https://a.com".into()));
        assert!(!collection.add("https://a.com".into()));
        assert!(collection.add("https://a.com/".into()));

        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_add_keeps_same_url_with_different_metadata() {
        let mut collection = TagCollection::new();
        collection.add("https://a.com".into());
        collection.add(
            Url::new("https://a.com")
                .with_changefreq(ChangeFrequency::Never)
                .into(),
        );

        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_get_url_is_exact_and_url_kind_only() {
        let collection: TagCollection = [
            Tag::from(Alternate::new("https://a.com/de", "de")),
            Tag::from("https://a.com"),
        ]
        .into_iter()
        .collect();

        assert!(collection.get_url("https://a.com").is_some());
        assert!(collection.get_url("https://a.com/").is_none());
        assert!(collection.get_url("HTTPS://a.com").is_none());
        assert!(!collection.has_url("https://a.com/de"));
    }

    #[test]
    fn test_get_url_returns_first_match() {
        let mut collection = TagCollection::new();
        collection.add(Url::new("https://a.com").with_priority(0.1).into());
        collection.add(Url::new("https://a.com").with_priority(0.9).into());

        let found = collection.get_url("https://a.com").unwrap();
        assert_eq!(found.priority.unwrap().value().to_string(), "0.1");
    }

    #[test]
    fn test_get_url_mut_edits_in_place() {
        let mut collection: TagCollection = ["https://a.com"].into_iter().collect();
        collection.get_url_mut("https://a.com").unwrap().changefreq = None;

        assert!(collection.get_url("https://a.com").unwrap().changefreq.is_none());
    }

    #[test]
    fn test_omit_urls_with_trailing_slash_policy() {
        let mut collection: TagCollection = ["http://a.com", "https://b.com/"].into_iter().collect();

        let removed = collection.omit_urls(["https://a.com/"], true);

        assert_eq!(removed, 1);
        assert_eq!(urls(&collection), vec!["https://b.com/"]);
    }

    #[test]
    fn test_omit_urls_without_trailing_slash_policy() {
        let mut collection: TagCollection =
            ["https://a.com///", "https://a.com/x"].into_iter().collect();

        collection.omit_urls(["a.com"], false);

        assert_eq!(urls(&collection), vec!["https://a.com/x"]);
    }

    #[test]
    fn test_omit_urls_keeps_non_url_tags() {
        let mut collection = TagCollection::new();
        collection.add(Alternate::new("https://a.com", "en").into());
        collection.add("https://a.com".into());

        collection.omit_urls(["https://a.com"], false);

        assert_eq!(collection.len(), 1);
        assert!(!collection.iter().next().unwrap().is_url());
    }

    #[test]
    fn test_omit_urls_with_empty_list_is_noop() {
        let mut collection: TagCollection = ["https://a.com"].into_iter().collect();
        assert_eq!(collection.omit_urls(Vec::<String>::new(), false), 0);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_normalize_and_dedup() {
        let mut collection: TagCollection =
            ["https://a.com/", "https://a.com", "https://b.com//"].into_iter().collect();
        collection.sort();
        collection.normalize_trailing_slashes(false);

        assert_eq!(
            urls(&collection),
            vec!["https://a.com", "https://a.com", "https://b.com"]
        );
        assert_eq!(collection.dedup_structural(), 1);
        assert_eq!(urls(&collection), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_normalize_with_trailing_slash_appends_once() {
        let mut collection: TagCollection =
            ["https://a.com", "https://b.com/", "https://c.com//"].into_iter().collect();
        collection.normalize_trailing_slashes(true);

        assert_eq!(
            urls(&collection),
            vec!["https://a.com/", "https://b.com/", "https://c.com//"]
        );
    }

    #[test]
    fn test_unique_by_url_keeps_first() {
        let mut collection = TagCollection::new();
        collection.add(Url::new("https://a.com").with_priority(0.3).into());
        collection.add(Url::new("https://a.com").with_priority(0.7).into());
        collection.add("https://b.com".into());

        let unique = collection.unique_by_url();
        assert_eq!(unique.len(), 2);
        assert_eq!(
            unique[0].as_url().unwrap().priority.unwrap().to_string(),
            "0.3"
        );
    }

    proptest! {
        #[test]
        fn test_len_matches_distinct_inputs(inputs in proptest::collection::vec("[ab]{1,3}", 0..32)) {
            let collection: TagCollection = inputs.iter().collect();
            let distinct: HashSet<&String> = inputs.iter().collect();
            prop_assert_eq!(collection.len(), distinct.len());
        }
    }
}

//! Sitemap entries.
//!
//! A [`Tag`] is one entry of a sitemap. Most tags are [`Url`]s carrying a
//! location plus optional `lastmod`, `changefreq` and `priority` metadata;
//! [`Alternate`] tags describe an alternate-language version of a page.
//!
//! Tags compare by value. Two tags built from the same inputs are equal, which
//! is what lets [`crate::TagCollection`] drop repeated inserts.
//!
//! ```
//! use sitemap_core::{ChangeFrequency, Tag, TagKind, Url};
//!
//! let tag: Tag = Url::new("https://example.com/docs")
//!     .with_changefreq(ChangeFrequency::Weekly)
//!     .with_priority(0.5)
//!     .into();
//!
//! assert_eq!(tag.kind(), TagKind::Url);
//! assert_eq!(tag.url(), "https://example.com/docs");
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Priority assigned to a fresh [`Url`].
pub const DEFAULT_PRIORITY: f32 = 0.8;

/// Change frequency assigned to a fresh [`Url`].
pub const DEFAULT_CHANGE_FREQUENCY: ChangeFrequency = ChangeFrequency::Daily;

/// Change frequency hints for a sitemap entry.
///
/// These values indicate how frequently a page is likely to change,
/// though search engines may not follow these hints strictly.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    /// The page changes every time it is accessed.
    Always,
    /// The page changes hourly.
    Hourly,
    /// The page changes daily.
    Daily,
    /// The page changes weekly.
    Weekly,
    /// The page changes monthly.
    Monthly,
    /// The page changes yearly.
    Yearly,
    /// The page is archived and will not change.
    Never,
}

impl ChangeFrequency {
    /// The value as written in a `<changefreq>` element.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(Error::Parse(format!("Invalid changefreq value: {s}"))),
        }
    }
}

/// Priority of a URL relative to the rest of the site, between 0.0 and 1.0.
///
/// Out-of-range and NaN inputs are clamped on construction, so every stored
/// value is finite and the type can be totally ordered and hashed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Priority(f32);

impl Priority {
    /// Create a priority, clamping to the `0.0..=1.0` range.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        // -0.0 and 0.0 must hash identically
        Self(value.clamp(0.0, 1.0) + 0.0)
    }

    /// The stored value.
    #[must_use]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl From<f32> for Priority {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Priority> for f32 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl PartialEq for Priority {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Priority {}

impl Hash for Priority {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

/// An alternate-language version of a page (`hreflang` link).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Alternate {
    /// Location of the alternate page.
    pub url: String,
    /// Language or locale code, e.g. `en` or `pt-BR`.
    pub locale: String,
}

impl Alternate {
    /// Create an alternate link.
    pub fn new(url: impl Into<String>, locale: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            locale: locale.into(),
        }
    }
}

/// A URL entry with its sitemap metadata.
///
/// Field order matters: the derived ordering compares `url` first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Url {
    /// The location of the page.
    pub url: String,
    /// Last modification date.
    pub lastmod: Option<DateTime<Utc>>,
    /// How frequently the page changes.
    pub changefreq: Option<ChangeFrequency>,
    /// Priority relative to other URLs of the site.
    pub priority: Option<Priority>,
    /// Alternate-language versions of this page.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternates: Vec<Alternate>,
}

impl Url {
    /// Create a URL tag with default metadata: no `lastmod`, `daily` change
    /// frequency and a priority of `0.8`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            lastmod: None,
            changefreq: Some(DEFAULT_CHANGE_FREQUENCY),
            priority: Some(Priority::new(DEFAULT_PRIORITY)),
            alternates: Vec::new(),
        }
    }

    /// Create a URL tag with no metadata at all.
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
            alternates: Vec::new(),
        }
    }

    /// Set the last modification date.
    #[must_use]
    pub fn with_lastmod(mut self, lastmod: DateTime<Utc>) -> Self {
        self.lastmod = Some(lastmod);
        self
    }

    /// Set the change frequency.
    #[must_use]
    pub fn with_changefreq(mut self, changefreq: ChangeFrequency) -> Self {
        self.changefreq = Some(changefreq);
        self
    }

    /// Set the priority (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(Priority::new(priority));
        self
    }

    /// Add an alternate-language link.
    #[must_use]
    pub fn with_alternate(mut self, url: impl Into<String>, locale: impl Into<String>) -> Self {
        self.alternates.push(Alternate::new(url, locale));
        self
    }
}

/// Discriminant of a [`Tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// A `<url>` entry.
    Url,
    /// A standalone alternate-language link.
    Alternate,
}

impl TagKind {
    /// Name of the kind (`"url"` or `"alternate"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Alternate => "alternate",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a sitemap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Tag {
    /// A page location with metadata.
    Url(Url),
    /// An alternate-language link not attached to a [`Url`].
    Alternate(Alternate),
}

impl Tag {
    /// The tag's discriminant.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::Url(_) => TagKind::Url,
            Self::Alternate(_) => TagKind::Alternate,
        }
    }

    /// The location carried by the tag, whatever its kind.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) => &url.url,
            Self::Alternate(alternate) => &alternate.url,
        }
    }

    /// Mutable access to the location, whatever the tag's kind.
    pub fn url_mut(&mut self) -> &mut String {
        match self {
            Self::Url(url) => &mut url.url,
            Self::Alternate(alternate) => &mut alternate.url,
        }
    }

    /// Narrow to a url-kind tag.
    #[must_use]
    pub const fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::Alternate(_) => None,
        }
    }

    /// Narrow to a mutable url-kind tag.
    pub fn as_url_mut(&mut self) -> Option<&mut Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::Alternate(_) => None,
        }
    }

    /// Whether this is a url-kind tag.
    #[must_use]
    pub const fn is_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

impl PartialOrd for Tag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.url()
            .cmp(other.url())
            .then_with(|| self.kind().cmp(&other.kind()))
            .then_with(|| match (self, other) {
                (Self::Url(a), Self::Url(b)) => a.cmp(b),
                (Self::Alternate(a), Self::Alternate(b)) => a.cmp(b),
                // kinds already compared unequal above
                _ => Ordering::Equal,
            })
    }
}

impl From<&str> for Tag {
    fn from(url: &str) -> Self {
        Self::Url(Url::new(url))
    }
}

impl From<String> for Tag {
    fn from(url: String) -> Self {
        Self::Url(Url::new(url))
    }
}

impl From<&String> for Tag {
    fn from(url: &String) -> Self {
        Self::Url(Url::new(url.as_str()))
    }
}

impl From<Url> for Tag {
    fn from(url: Url) -> Self {
        Self::Url(url)
    }
}

impl From<Alternate> for Tag {
    fn from(alternate: Alternate) -> Self {
        Self::Alternate(alternate)
    }
}

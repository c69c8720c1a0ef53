//! The sitemap builder.
//!
//! [`Sitemap`] owns a [`TagCollection`] and the pipeline flags. Entries are
//! added and pruned through its mutation API; [`Sitemap::render`] runs the
//! pipeline and hands the surviving tags to a [`Renderer`].
//!
//! ## Render pipeline
//!
//! 1. Sort all tags (URL first, see [`Tag`]'s ordering).
//! 2. With `delete_duplicates`: rewrite every stored URL with the
//!    trailing-slash policy, then drop tags that became value-equal to an
//!    earlier one.
//! 3. Keep only the first tag for each distinct URL.
//! 4. With `delete_http`: drop tags whose URL starts with `http:`.
//!
//! Steps 1 and 2 modify the stored collection; steps 3 and 4 only filter
//! what is rendered.
//!
//! ```rust
//! use sitemap_core::Sitemap;
//!
//! let mut sitemap = Sitemap::create();
//! sitemap
//!     .add("https://example.com/b")
//!     .add("https://example.com/a")
//!     .add("https://example.com/a");
//!
//! let xml = sitemap.render()?;
//! let a = xml.find("https://example.com/a").unwrap();
//! let b = xml.find("https://example.com/b").unwrap();
//! assert!(a < b);
//! # Ok::<(), sitemap_core::Error>(())
//! ```

use crate::config::SitemapOptions;
use crate::parse::parse_sitemap;
use crate::render::{Renderer, XmlRenderer};
use crate::response::SitemapResponse;
use crate::sink::{Disks, FileSink, Sink};
use crate::{Result, Tag, TagCollection, Url};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Builder for one sitemap document.
///
/// Not internally synchronized; use one builder per sitemap being built.
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    tags: TagCollection,
    options: SitemapOptions,
}

impl Sitemap {
    /// Empty sitemap with all pipeline flags off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias for [`Sitemap::new`].
    #[must_use]
    pub fn create() -> Self {
        Self::new()
    }

    /// Empty sitemap with the given flags.
    #[must_use]
    pub fn with_options(options: SitemapOptions) -> Self {
        Self {
            tags: TagCollection::new(),
            options,
        }
    }

    /// Seed a sitemap from an existing `<urlset>` document.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut sitemap = Self::new();
        for url in parse_sitemap(xml)? {
            sitemap.add(url);
        }
        Ok(sitemap)
    }

    /// Current pipeline flags.
    #[must_use]
    pub const fn options(&self) -> SitemapOptions {
        self.options
    }

    /// Enable or disable trailing-slash canonicalization and duplicate removal.
    pub fn set_delete_duplicates(&mut self, enabled: bool) -> &mut Self {
        self.options.delete_duplicates = enabled;
        self
    }

    /// Enable or disable dropping `http:` URLs at render time.
    pub fn set_delete_http(&mut self, enabled: bool) -> &mut Self {
        self.options.delete_http = enabled;
        self
    }

    /// Choose the trailing-slash policy.
    pub fn set_add_trailing_slash(&mut self, enabled: bool) -> &mut Self {
        self.options.add_trailing_slash = enabled;
        self
    }

    /// Add a tag, or a URL string wrapped in a default [`Url`].
    ///
    /// A tag value-equal to one already present is ignored.
    pub fn add(&mut self, tag: impl Into<Tag>) -> &mut Self {
        self.tags.add(tag.into());
        self
    }

    /// Stored tags, in current order.
    #[must_use]
    pub const fn tags(&self) -> &TagCollection {
        &self.tags
    }

    /// First url-kind tag whose URL equals `url` exactly.
    #[must_use]
    pub fn get_url(&self, url: &str) -> Option<&Url> {
        self.tags.get_url(url)
    }

    /// Mutable form of [`Sitemap::get_url`].
    pub fn get_url_mut(&mut self, url: &str) -> Option<&mut Url> {
        self.tags.get_url_mut(url)
    }

    /// Whether a url-kind tag with exactly this URL exists.
    #[must_use]
    pub fn has_url(&self, url: &str) -> bool {
        self.tags.has_url(url)
    }

    /// Remove url-kind tags matching any of `urls`, ignoring scheme and
    /// comparing under the trailing-slash policy.
    pub fn omit_urls<I, S>(&mut self, urls: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags.omit_urls(urls, self.options.add_trailing_slash);
        self
    }

    /// Run the pipeline and return the tags that will be rendered.
    ///
    /// Sorting and duplicate normalization are applied to the stored
    /// collection.
    #[instrument(skip(self), fields(tags = self.tags.len()))]
    pub fn prepare(&mut self) -> Vec<&Tag> {
        self.tags.sort();

        if self.options.delete_duplicates {
            self.tags
                .normalize_trailing_slashes(self.options.add_trailing_slash);
            let removed = self.tags.dedup_structural();
            debug!(removed, "Removed duplicate tags");
        }

        let delete_http = self.options.delete_http;
        let prepared: Vec<&Tag> = self
            .tags
            .unique_by_url()
            .into_iter()
            .filter(|tag| !(delete_http && tag.url().starts_with("http:")))
            .collect();

        debug!(stored = self.tags.len(), rendered = prepared.len(), "Prepared sitemap");
        prepared
    }

    /// Render with the default [`XmlRenderer`].
    pub fn render(&mut self) -> Result<String> {
        self.render_with(&XmlRenderer::default())
    }

    /// Render with a custom renderer.
    pub fn render_with(&mut self, renderer: &dyn Renderer) -> Result<String> {
        let tags = self.prepare();
        renderer.render(&tags)
    }

    /// Render and hand the document to `sink` under `destination`.
    #[instrument(skip(self, sink))]
    pub fn write_to(&mut self, sink: &dyn Sink, destination: &str) -> Result<&mut Self> {
        let xml = self.render()?;
        sink.put(destination, &xml)?;
        info!(destination, bytes = xml.len(), "Persisted sitemap");
        Ok(self)
    }

    /// Render and write the document to a filesystem path.
    pub fn write_to_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self> {
        let path = path.as_ref();
        let xml = self.render()?;
        FileSink.write(path, &xml)?;
        info!(path = %path.display(), bytes = xml.len(), "Persisted sitemap");
        Ok(self)
    }

    /// Render and write the document to `path` on the named disk.
    pub fn write_to_disk(&mut self, disks: &Disks, disk: &str, path: &str) -> Result<&mut Self> {
        let sink = disks.disk(disk)?;
        self.write_to(sink, path)
    }

    /// Render into a `200 text/xml` response.
    pub fn to_response(&mut self) -> Result<SitemapResponse> {
        Ok(SitemapResponse::ok(self.render()?))
    }
}

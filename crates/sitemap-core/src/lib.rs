//! # sitemap-core
//!
//! Build XML sitemaps: collect URL entries, prune and deduplicate them, and
//! render a deterministic `urlset` document.
//!
//! ## Architecture
//!
//! - **Tags**: value-typed sitemap entries ([`Url`], [`Alternate`]) behind the
//!   [`Tag`] enum
//! - **Collection**: [`TagCollection`], insertion-ordered with structural
//!   dedup on insert
//! - **Builder**: [`Sitemap`], holding the pipeline flags and running the
//!   sort / normalize / unique / scheme-filter pipeline before rendering
//! - **Rendering**: the [`Renderer`] seam and the quick-xml [`XmlRenderer`]
//! - **Persistence**: the [`Sink`] seam with file and named-disk sinks, and
//!   [`SitemapResponse`] for HTTP handlers
//!
//! ## Quick Start
//!
//! ```rust
//! use sitemap_core::{ChangeFrequency, Sitemap, Url};
//!
//! let mut sitemap = Sitemap::create();
//! sitemap
//!     .set_delete_duplicates(true)
//!     .set_delete_http(true)
//!     .add("https://example.com/")
//!     .add("https://example.com")
//!     .add("http://example.com/legacy")
//!     .add(Url::new("https://example.com/blog").with_changefreq(ChangeFrequency::Hourly));
//!
//! sitemap.omit_urls(["example.com/private"]);
//!
//! let xml = sitemap.render()?;
//! assert!(xml.contains("<loc>https://example.com</loc>"));
//! assert!(!xml.contains("legacy"));
//! # Ok::<(), sitemap_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Building and rendering never reject input. Only persistence, parsing and
//! configuration return errors, all as [`Error`]:
//!
//! ```rust
//! use sitemap_core::{Disks, Error, Sitemap};
//!
//! let mut sitemap = Sitemap::new();
//! match sitemap.write_to_disk(&Disks::new(), "public", "sitemap.xml") {
//!     Ok(_) => println!("written"),
//!     Err(Error::NotFound(what)) => eprintln!("missing {what}"),
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//! }
//! ```

/// Tag storage with dedup, lookup and omission
pub mod collection;
/// Configuration for pipeline flags and disks
pub mod config;
/// Error types and result aliases
pub mod error;
/// Trailing-slash and scheme normalization
pub mod normalize;
/// Reading existing sitemap XML
pub mod parse;
/// Rendering tags to sitemap XML
pub mod render;
/// HTTP response wrapper
pub mod response;
/// Persistence sinks
pub mod sink;
/// The sitemap builder and render pipeline
pub mod sitemap;
/// Sitemap entry types
pub mod tag;

// Re-export commonly used types
pub use collection::TagCollection;
pub use config::{DiskConfig, SitemapConfig, SitemapOptions};
pub use error::{Error, Result};
pub use parse::parse_sitemap;
pub use render::{Renderer, XmlRenderer};
pub use response::SitemapResponse;
pub use sink::{DiskSink, Disks, FileSink, Sink};
pub use sitemap::Sitemap;
pub use tag::{Alternate, ChangeFrequency, Priority, Tag, TagKind, Url};

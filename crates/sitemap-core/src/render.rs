//! Turning a prepared tag sequence into sitemap XML.
//!
//! The [`Renderer`] trait is the seam between the tag pipeline and the
//! markup. [`XmlRenderer`] writes the standard `urlset` schema:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9" xmlns:xhtml="http://www.w3.org/1999/xhtml">
//!     <url>
//!         <loc>https://example.com/</loc>
//!         <xhtml:link rel="alternate" hreflang="de" href="https://example.com/de/"/>
//!         <lastmod>2024-01-15T10:30:00+00:00</lastmod>
//!         <changefreq>daily</changefreq>
//!         <priority>0.8</priority>
//!     </url>
//! </urlset>
//! ```

use crate::{Alternate, Error, Result, Tag, Url};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Namespace of the sitemap protocol.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Namespace used for `xhtml:link` alternate entries.
pub const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Format used for `<lastmod>` (W3C datetime with offset).
const LASTMOD_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Produces the textual sitemap for a prepared tag sequence.
///
/// Implementations must not reorder or filter: the sequence already reflects
/// sorting, deduplication and scheme filtering.
pub trait Renderer {
    /// Render the tags to a document.
    fn render(&self, tags: &[&Tag]) -> Result<String>;
}

impl<F> Renderer for F
where
    F: Fn(&[&Tag]) -> Result<String>,
{
    fn render(&self, tags: &[&Tag]) -> Result<String> {
        self(tags)
    }
}

/// Renders the `urlset` XML schema with quick-xml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlRenderer {
    indent: usize,
}

impl Default for XmlRenderer {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

impl XmlRenderer {
    /// Renderer with the default 4-space indentation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer with a custom indentation width; `0` writes a single line.
    #[must_use]
    pub const fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn write_url(writer: &mut Writer<Vec<u8>>, url: &Url) -> Result<()> {
        start(writer, BytesStart::new("url"))?;
        if !url.url.is_empty() {
            text_element(writer, "loc", &url.url)?;
        }
        for alternate in &url.alternates {
            alternate_link(writer, alternate)?;
        }
        if let Some(lastmod) = url.lastmod {
            text_element(writer, "lastmod", &lastmod.format(LASTMOD_FORMAT).to_string())?;
        }
        if let Some(changefreq) = url.changefreq {
            text_element(writer, "changefreq", changefreq.as_str())?;
        }
        if let Some(priority) = url.priority {
            text_element(writer, "priority", &priority.to_string())?;
        }
        end(writer, "url")
    }

    fn write_alternate(writer: &mut Writer<Vec<u8>>, alternate: &Alternate) -> Result<()> {
        start(writer, BytesStart::new("url"))?;
        if !alternate.url.is_empty() {
            text_element(writer, "loc", &alternate.url)?;
        }
        alternate_link(writer, alternate)?;
        end(writer, "url")
    }
}

impl Renderer for XmlRenderer {
    #[tracing::instrument(skip_all, fields(tags = tags.len()))]
    fn render(&self, tags: &[&Tag]) -> Result<String> {
        let mut writer = if self.indent == 0 {
            Writer::new(Vec::new())
        } else {
            Writer::new_with_indent(Vec::new(), b' ', self.indent)
        };

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(render_error)?;
        start(
            &mut writer,
            BytesStart::new("urlset")
                .with_attributes([("xmlns", SITEMAP_NAMESPACE), ("xmlns:xhtml", XHTML_NAMESPACE)]),
        )?;

        for tag in tags {
            match tag {
                Tag::Url(url) => Self::write_url(&mut writer, url)?,
                Tag::Alternate(alternate) => Self::write_alternate(&mut writer, alternate)?,
            }
        }

        end(&mut writer, "urlset")?;

        let mut xml = String::from_utf8(writer.into_inner())
            .map_err(|e| Error::Render(format!("Rendered XML is not UTF-8: {e}")))?;
        xml.push('\n');
        Ok(xml)
    }
}

fn render_error(err: impl std::fmt::Display) -> Error {
    Error::Render(err.to_string())
}

fn start(writer: &mut Writer<Vec<u8>>, element: BytesStart<'_>) -> Result<()> {
    writer
        .write_event(Event::Start(element))
        .map_err(render_error)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(render_error)
}

fn text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    writer
        .create_element(name)
        .write_text_content(BytesText::new(text))
        .map_err(render_error)?;
    Ok(())
}

fn alternate_link(writer: &mut Writer<Vec<u8>>, alternate: &Alternate) -> Result<()> {
    writer
        .write_event(Event::Empty(BytesStart::new("xhtml:link").with_attributes([
            ("rel", "alternate"),
            ("hreflang", alternate.locale.as_str()),
            ("href", alternate.url.as_str()),
        ])))
        .map_err(render_error)
}

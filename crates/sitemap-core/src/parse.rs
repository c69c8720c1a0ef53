//! Reading existing sitemap XML back into tags.
//!
//! Useful for extending a sitemap that was generated earlier: parse it,
//! seed a [`crate::Sitemap`] with the result, add or omit entries, render.
//!
//! ```
//! use sitemap_core::parse::parse_sitemap;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/page1</loc>
//!     <lastmod>2024-01-15</lastmod>
//!   </url>
//! </urlset>"#;
//!
//! let urls = parse_sitemap(xml)?;
//! assert_eq!(urls.len(), 1);
//! assert_eq!(urls[0].url, "https://example.com/page1");
//! # Ok::<(), sitemap_core::Error>(())
//! ```
//!
//! Only `<urlset>` documents are accepted. Sitemap index files are rejected
//! with [`Error::Parse`].

use crate::{Alternate, ChangeFrequency, Error, Priority, Result, Url};
use chrono::{DateTime, NaiveDate, Utc};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::instrument;

/// Parse a `<urlset>` document into url tags.
///
/// Missing optional elements stay `None`; no default metadata is applied.
/// `<url>` entries without a `<loc>` are skipped.
///
/// # Errors
///
/// Returns an error if:
/// - The XML is malformed
/// - The XML is a sitemap index (root element `<sitemapindex>`)
#[instrument(skip(xml), fields(xml_len = xml.len()))]
pub fn parse_sitemap(xml: &str) -> Result<Vec<Url>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    parse_urlset(&mut reader)
}

/// Check if the XML content is a sitemap index, judged by its root element.
///
/// Malformed documents are not indexes.
#[must_use]
pub fn is_sitemap_index(xml: &str) -> bool {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e) | Event::Empty(e)) => return is_index_root(&e),
            Ok(Event::Eof) | Err(_) => return false,
            _ => {},
        }
    }
}

fn is_index_root(element: &BytesStart<'_>) -> bool {
    element.local_name().as_ref() == b"sitemapindex"
}

/// Reject a sitemap index the first time a root element is seen.
fn check_root(root_seen: &mut bool, element: &BytesStart<'_>) -> Result<()> {
    if !std::mem::replace(root_seen, true) && is_index_root(element) {
        return Err(Error::Parse(
            "XML is a sitemap index, not a standard sitemap".to_string(),
        ));
    }
    Ok(())
}

fn parse_urlset(reader: &mut Reader<&[u8]>) -> Result<Vec<Url>> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();

    // State for parsing current URL entry
    let mut current: Option<Url> = None;
    let mut has_loc = false;
    let mut current_element: Option<String> = None;
    let mut root_seen = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                check_root(&mut root_seen, &e)?;
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                match name.as_str() {
                    "url" => {
                        current = Some(Url::bare(String::new()));
                        has_loc = false;
                    },
                    "loc" | "lastmod" | "changefreq" | "priority" if current.is_some() => {
                        current_element = Some(name);
                    },
                    "link" => {
                        if let Some(url) = current.as_mut() {
                            push_alternate(url, &e)?;
                        }
                    },
                    _ => {},
                }
            },
            Ok(Event::Empty(e)) => {
                check_root(&mut root_seen, &e)?;
                if e.local_name().as_ref() == b"link" {
                    if let Some(url) = current.as_mut() {
                        push_alternate(url, &e)?;
                    }
                }
            },
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"url" {
                    if let Some(url) = current.take() {
                        if has_loc {
                            entries.push(url);
                        } else {
                            tracing::warn!("Skipping <url> entry without <loc>");
                        }
                    }
                }
                current_element = None;
            },
            Ok(Event::Text(e)) => {
                if let (Some(element), Some(url)) = (current_element.as_deref(), current.as_mut()) {
                    let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                    apply_text(url, element, &text, &mut has_loc);
                }
            },
            Ok(Event::CData(e)) => {
                if let (Some(element), Some(url)) = (current_element.as_deref(), current.as_mut()) {
                    // CDATA content is taken verbatim, without entity unescaping
                    let raw = e.into_inner();
                    let text = std::str::from_utf8(&raw).map_err(|e| Error::Parse(e.to_string()))?;
                    apply_text(url, element, text, &mut has_loc);
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Parse(format!("XML parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }

    Ok(entries)
}

/// Store the text of a child element of `<url>`.
fn apply_text(url: &mut Url, element: &str, text: &str, has_loc: &mut bool) {
    let text = text.trim();
    match element {
        "loc" => {
            url.url = text.to_string();
            *has_loc = true;
        },
        "lastmod" => url.lastmod = parse_lastmod(text),
        "changefreq" => url.changefreq = text.parse::<ChangeFrequency>().ok(),
        "priority" => url.priority = parse_priority(text),
        _ => {},
    }
}

/// Read an `xhtml:link rel="alternate"` element into the current url.
fn push_alternate(url: &mut Url, element: &BytesStart<'_>) -> Result<()> {
    let attribute = |name: &str| -> Result<Option<String>> {
        element
            .try_get_attribute(name)
            .map_err(|e| Error::Parse(e.to_string()))?
            .map(|attr| {
                attr.unescape_value()
                    .map(|value| value.into_owned())
                    .map_err(|e| Error::Parse(e.to_string()))
            })
            .transpose()
    };

    if attribute("rel")?.as_deref() != Some("alternate") {
        return Ok(());
    }
    if let (Some(href), Some(locale)) = (attribute("href")?, attribute("hreflang")?) {
        url.alternates.push(Alternate::new(href, locale));
    }
    Ok(())
}

/// Parse a lastmod date string into a `DateTime<Utc>`.
///
/// Supports multiple date formats:
/// - `2024-01-15` (date only)
/// - `2024-01-15T10:30:00Z` (ISO 8601 with Z)
/// - `2024-01-15T10:30:00+00:00` (ISO 8601 with offset)
/// - `2024-01-15T10:30:00.000Z` (with milliseconds)
fn parse_lastmod(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    // Without timezone, assume UTC
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc());
    }

    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }

    tracing::debug!(date_str = %s, "Could not parse lastmod date");
    None
}

fn parse_priority(s: &str) -> Option<Priority> {
    s.parse::<f32>().ok().map(Priority::new)
}

//! Writing rendered sitemaps to files, disks and responses.

#![allow(clippy::unwrap_used)]

use sitemap_core::{Disks, Error, Sitemap, SitemapConfig, parse_sitemap};
use std::fs;
use tempfile::TempDir;

fn sample_sitemap() -> Sitemap {
    let mut sitemap = Sitemap::create();
    sitemap.add("https://example.com/b").add("https://example.com/a");
    sitemap
}

#[test]
fn write_to_file_persists_rendered_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("public/sitemap.xml");
    let mut sitemap = sample_sitemap();

    sitemap.write_to_file(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, sitemap.render().unwrap());
    let urls = parse_sitemap(&written).unwrap();
    assert_eq!(urls[0].url, "https://example.com/a");
}

#[test]
fn write_to_file_is_chainable() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("one.xml");
    let second = temp_dir.path().join("two.xml");

    sample_sitemap()
        .write_to_file(&first)
        .unwrap()
        .add("https://example.com/c")
        .write_to_file(&second)
        .unwrap();

    assert!(!fs::read_to_string(first).unwrap().contains("/c<"));
    assert!(fs::read_to_string(second).unwrap().contains("https://example.com/c"));
}

#[test]
fn write_to_file_surfaces_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("blocker");
    fs::write(&blocker, "file, not dir").unwrap();

    let err = sample_sitemap()
        .write_to_file(blocker.join("sitemap.xml"))
        .unwrap_err();

    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn write_to_disk_uses_configured_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("www");
    let config = SitemapConfig::from_toml_str(&format!(
        "[options]\ndelete_http = true\n\n[disks.public]\nroot = {:?}\n",
        root.to_str().unwrap()
    ))
    .unwrap();
    let disks = Disks::from_config(&config);

    let mut sitemap = Sitemap::with_options(config.options);
    sitemap.add("http://example.com/legacy").add("https://example.com/");
    sitemap.write_to_disk(&disks, "public", "maps/sitemap.xml").unwrap();

    let written = fs::read_to_string(root.join("maps/sitemap.xml")).unwrap();
    assert!(written.contains("<loc>https://example.com/</loc>"));
    assert!(!written.contains("legacy"));
}

#[test]
fn write_to_disk_rejects_escaping_paths() {
    let temp_dir = TempDir::new().unwrap();
    let mut disks = Disks::new();
    disks.insert(
        "public",
        sitemap_core::DiskSink::new(temp_dir.path().join("www")),
    );

    let err = sample_sitemap()
        .write_to_disk(&disks, "public", "../outside.xml")
        .unwrap_err();

    assert_eq!(err.category(), "storage");
    assert!(!temp_dir.path().join("outside.xml").exists());
}

#[test]
fn response_wraps_rendered_xml() {
    let mut sitemap = sample_sitemap();

    let response = sitemap.to_response().unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.headers(), [("Content-Type", "text/xml")]);
    assert_eq!(response.body, sitemap.render().unwrap());
}

#[cfg(target_os = "linux")]
#[test]
fn write_to_file_keeps_non_utf8_path_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let temp_dir = TempDir::new().unwrap();
    let name = OsStr::from_bytes(b"site\xffmap.xml");
    let path = temp_dir.path().join(name);

    sample_sitemap().write_to_file(&path).unwrap();

    assert!(path.exists());
    let entries: Vec<_> = fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![name.to_os_string()]);
}

//! Destinations for rendered sitemaps.
//!
//! A [`Sink`] receives the rendered document plus a destination identifier.
//! Failures are returned as-is; nothing here retries.

use crate::config::SitemapConfig;
use crate::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Persists rendered content under a destination identifier.
pub trait Sink {
    /// Store `content` at `destination`.
    fn put(&self, destination: &str, content: &str) -> Result<()>;
}

/// Write `content` to `path` through a uniquely named temporary sibling, then
/// move it into place.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;
    // the temp file is removed on drop if persisting fails
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote sitemap");
    Ok(())
}

/// Writes to the filesystem path given as destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl FileSink {
    /// Write `content` to `path` without converting the path to a string.
    pub fn write(self, path: &Path, content: &str) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(Error::Storage("Destination path is empty".into()));
        }
        write_atomically(path, content)
    }
}

impl Sink for FileSink {
    fn put(&self, destination: &str, content: &str) -> Result<()> {
        if destination.trim().is_empty() {
            return Err(Error::Storage("Destination path is empty".into()));
        }
        self.write(Path::new(destination), content)
    }
}

/// A named storage root; destinations are paths relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    /// Create a disk rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the disk.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a destination under the root.
    ///
    /// Only plain path segments are accepted; absolute paths, drive prefixes
    /// and `..` segments would leave the root and are rejected.
    pub fn resolve(&self, destination: &str) -> Result<PathBuf> {
        let relative = Path::new(destination);
        let mut resolved = self.root.clone();
        let mut segments = 0usize;

        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    resolved.push(segment);
                    segments += 1;
                },
                Component::CurDir => {},
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::Storage(format!(
                        "Destination '{destination}' escapes the disk root"
                    )));
                },
            }
        }

        if segments == 0 {
            return Err(Error::Storage("Destination path is empty".into()));
        }
        Ok(resolved)
    }
}

impl Sink for DiskSink {
    fn put(&self, destination: &str, content: &str) -> Result<()> {
        let path = self.resolve(destination)?;
        write_atomically(&path, content)
    }
}

/// Registry of named disks.
#[derive(Debug, Clone, Default)]
pub struct Disks {
    disks: BTreeMap<String, DiskSink>,
}

impl Disks {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the `[disks]` table of a configuration.
    #[must_use]
    pub fn from_config(config: &SitemapConfig) -> Self {
        let disks = config
            .disks
            .iter()
            .map(|(name, disk)| (name.clone(), DiskSink::new(disk.root.clone())))
            .collect();
        Self { disks }
    }

    /// Register (or replace) a disk.
    pub fn insert(&mut self, name: impl Into<String>, disk: DiskSink) -> &mut Self {
        let name = name.into();
        info!(disk = %name, root = %disk.root.display(), "Registered disk");
        self.disks.insert(name, disk);
        self
    }

    /// Look up a disk by name.
    pub fn disk(&self, name: &str) -> Result<&DiskSink> {
        self.disks
            .get(name)
            .ok_or_else(|| Error::NotFound(format!("disk '{name}'")))
    }

    /// Names of registered disks, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.disks.keys().map(String::as_str)
    }
}

//! Configuration for sitemap building and persistence.
//!
//! Configuration is plain data that can be deserialized from TOML. The crate
//! never decides where a configuration file lives; callers pass the content
//! or an explicit path.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [options]
//! delete_duplicates = true
//! delete_http = true
//! add_trailing_slash = false
//!
//! [disks.public]
//! root = "/srv/www/public"
//! ```
//!
//! ```rust
//! use sitemap_core::{Disks, Sitemap, SitemapConfig};
//!
//! let config = SitemapConfig::from_toml_str(
//!     r#"
//!     [options]
//!     delete_http = true
//!
//!     [disks.public]
//!     root = "/srv/www/public"
//!     "#,
//! )?;
//!
//! let sitemap = Sitemap::with_options(config.options);
//! let disks = Disks::from_config(&config);
//! assert!(sitemap.options().delete_http);
//! assert!(disks.disk("public").is_ok());
//! # Ok::<(), sitemap_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Flags controlling the render pipeline. All default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapOptions {
    /// Canonicalize trailing slashes of stored URLs and drop the tags that
    /// become value-equal as a result.
    pub delete_duplicates: bool,

    /// Drop entries whose URL starts with `http:`.
    pub delete_http: bool,

    /// Trailing-slash policy: ensure one trailing `/` when set, strip all
    /// trailing slashes otherwise. Used by omission and duplicate removal.
    pub add_trailing_slash: bool,
}

/// A named storage root for [`crate::DiskSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskConfig {
    /// Directory destinations are resolved against.
    pub root: PathBuf,
}

/// Complete configuration: pipeline flags plus named disks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Render pipeline flags.
    pub options: SitemapOptions,

    /// Named disks available to [`crate::Sitemap::write_to_disk`].
    pub disks: BTreeMap<String, DiskConfig>,
}

impl SitemapConfig {
    /// Parse configuration from TOML text.
    ///
    /// Missing sections and fields fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize the configuration to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize config: {e}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_all_off() {
        let config = SitemapConfig::from_toml_str("").unwrap();

        assert_eq!(config, SitemapConfig::default());
        assert!(!config.options.delete_duplicates);
        assert!(!config.options.delete_http);
        assert!(!config.options.add_trailing_slash);
        assert!(config.disks.is_empty());
    }

    #[test]
    fn test_partial_options() {
        let config = SitemapConfig::from_toml_str("[options]\nadd_trailing_slash = true\n").unwrap();

        assert!(config.options.add_trailing_slash);
        assert!(!config.options.delete_http);
    }

    #[test]
    fn test_disks_table() {
        let config = SitemapConfig::from_toml_str(
            r#"
            [disks.public]
            root = "/srv/public"

            [disks.backup]
            root = "relative/backup"
            "#,
        )
        .unwrap();

        assert_eq!(config.disks.len(), 2);
        assert_eq!(config.disks["public"].root, PathBuf::from("/srv/public"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SitemapConfig::from_toml_str("[options\n").unwrap_err();
        assert_eq!(err.category(), "config");

        let err = SitemapConfig::from_toml_str("[options]\ndelete_http = \"yes\"\n").unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_load_from_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sitemap.toml");

        let mut config = SitemapConfig::default();
        config.options.delete_duplicates = true;
        config.disks.insert(
            "public".to_string(),
            DiskConfig {
                root: temp_dir.path().join("public"),
            },
        );
        fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        assert_eq!(SitemapConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = SitemapConfig::load_from("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}

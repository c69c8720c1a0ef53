//! Error types and handling for sitemap-core operations.
//!
//! Building and filtering a sitemap never fails: malformed or empty URLs are
//! accepted and rendered as-is, and lookups report absence as `None`/`false`.
//! Errors only come from the edges of the crate:
//!
//! - **I/O Errors**: writing a rendered sitemap through a sink
//! - **Parse Errors**: reading an existing sitemap document back in
//! - **Render Errors**: the XML writer rejecting output
//! - **Storage Errors**: sink-level failures beyond plain I/O (path escapes)
//! - **Configuration Errors**: invalid TOML configuration
//! - **Not Found**: an unknown named disk
//!
//! ```rust
//! use sitemap_core::{Error, Result, Sitemap};
//!
//! fn persist(sitemap: &mut Sitemap) -> Result<()> {
//!     match sitemap.write_to_file("/nonexistent-root/sitemap.xml") {
//!         Ok(_) => Ok(()),
//!         Err(e) if e.is_recoverable() => {
//!             println!("Temporary failure: {e}");
//!             Ok(())
//!         }
//!         Err(e) => {
//!             println!("Permanent failure ({}): {e}", e.category());
//!             Err(e)
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// The main error type for sitemap-core operations.
///
/// Sink failures are wrapped without being retried or reinterpreted, so the
/// caller sees the original `std::io::Error` through [`Error::Io`].
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Raised by file and disk sinks when the rendered document cannot be
    /// written. The underlying `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An existing sitemap document could not be parsed.
    ///
    /// ## Common Causes
    ///
    /// - Malformed XML (mismatched or unclosed tags)
    /// - A sitemap index was given where a `<urlset>` was expected
    /// - Invalid `changefreq` values
    #[error("Parse error: {0}")]
    Parse(String),

    /// The renderer failed to produce XML output.
    #[error("Render error: {0}")]
    Render(String),

    /// A sink rejected the destination.
    ///
    /// ## Common Causes
    ///
    /// - Destination path escapes the disk root (`..`, absolute paths)
    /// - Empty destination path
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource was not found.
    ///
    /// Used when a named disk is not registered.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry logic.
    ///
    /// The crate itself never retries; this is a hint for callers.
    ///
    /// ```rust
    /// use sitemap_core::Error;
    /// use std::io;
    ///
    /// assert!(Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")).is_recoverable());
    /// assert!(!Error::Parse("bad xml".to_string()).is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(e) => {
                // Consider temporary I/O errors as recoverable
                matches!(
                    e.kind(),
                    std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
                )
            },
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    ///
    /// - `"io"` - File system and I/O operations
    /// - `"parse"` - Reading sitemap documents
    /// - `"render"` - Producing XML output
    /// - `"storage"` - Sink destination handling
    /// - `"config"` - Configuration and settings
    /// - `"not_found"` - Missing disks
    /// - `"serialization"` - Data format conversion
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Parse(_) => "parse",
            Self::Render(_) => "render",
            Self::Storage(_) => "storage",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::disallowed_macros,
    clippy::unwrap_used,
    clippy::unnecessary_wraps
)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let errors = vec![
            (Error::Parse("invalid syntax".to_string()), "Parse error"),
            (Error::Render("writer failed".to_string()), "Render error"),
            (Error::Storage("path escapes root".to_string()), "Storage error"),
            (Error::Config("missing field".to_string()), "Configuration error"),
            (Error::NotFound("disk 'public'".to_string()), "Not found"),
            (Error::Serialization("bad json".to_string()), "Serialization error"),
        ];

        for (error, prefix) in errors {
            let error_string = error.to_string();
            assert!(
                error_string.starts_with(prefix),
                "{error_string} should start with {prefix}"
            );
        }
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: Error = io_err.into();

        match error {
            Error::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied);
            },
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_error_from_toml_error() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let error: Error = toml_err.into();
        assert_eq!(error.category(), "config");
    }

    #[test]
    fn test_error_categories() {
        let error_categories = vec![
            (Error::Io(io::Error::other("test")), "io"),
            (Error::Parse("test".to_string()), "parse"),
            (Error::Render("test".to_string()), "render"),
            (Error::Storage("test".to_string()), "storage"),
            (Error::Config("test".to_string()), "config"),
            (Error::NotFound("test".to_string()), "not_found"),
            (Error::Serialization("test".to_string()), "serialization"),
        ];

        for (error, expected_category) in error_categories {
            assert_eq!(error.category(), expected_category);
        }
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable_errors = vec![
            Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
        ];

        let non_recoverable_errors = vec![
            Error::Io(io::Error::new(io::ErrorKind::NotFound, "not found")),
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Error::Parse("bad syntax".to_string()),
            Error::Render("bad writer".to_string()),
            Error::Storage("escape".to_string()),
            Error::Config("invalid config".to_string()),
            Error::NotFound("missing".to_string()),
            Error::Serialization("bad toml".to_string()),
        ];

        for error in recoverable_errors {
            assert!(
                error.is_recoverable(),
                "Expected {error:?} to be recoverable"
            );
        }

        for error in non_recoverable_errors {
            assert!(
                !error.is_recoverable(),
                "Expected {error:?} to be non-recoverable"
            );
        }
    }

    #[test]
    fn test_error_chain_source() {
        use std::error::Error as _;

        let error = Error::Io(io::Error::other("disk full"));
        assert!(error.source().is_some());

        let error = Error::Parse("no source".to_string());
        assert!(error.source().is_none());
    }

    proptest! {
        #[test]
        fn test_parse_error_with_arbitrary_messages(msg in r".{0,200}") {
            let error = Error::Parse(msg.clone());
            let error_string = error.to_string();

            prop_assert!(error_string.contains("Parse error"));
            prop_assert!(error_string.contains(&msg));
            prop_assert_eq!(error.category(), "parse");
            prop_assert!(!error.is_recoverable());
        }

        #[test]
        fn test_storage_error_with_arbitrary_messages(msg in r".{0,200}") {
            let error = Error::Storage(msg.clone());

            prop_assert!(error.to_string().contains(&msg));
            prop_assert_eq!(error.category(), "storage");
            prop_assert!(!error.is_recoverable());
        }
    }
}

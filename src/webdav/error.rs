//! Error types for the WebDAV module.
//!
//! Listing errors are fatal for a crawl (the traversal cannot proceed
//! without a directory listing); download errors are recovered per file.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while listing a WebDAV collection.
#[derive(Debug, Error)]
pub enum WebdavError {
    /// The PROPFIND request returned something other than 207 Multi-Status.
    #[error("listing failed with HTTP {status} for {url}")]
    ListingFailed {
        /// The collection URL that was listed.
        url: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error listing {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout listing {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// The multi-status body could not be parsed.
    #[error("invalid multi-status response: {message}")]
    Xml {
        /// Description of the parse failure.
        message: String,
    },
}

impl WebdavError {
    /// Creates a listing-failed error from a non-207 response.
    pub fn listing_failed(url: impl Into<String>, status: u16) -> Self {
        Self::ListingFailed {
            url: url.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an XML parse error.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            message: message.into(),
        }
    }
}

/// Errors that can occur while downloading a single file.
///
/// These are per-file failures: the crawler logs them and moves on to the
/// next file instead of aborting the run.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The GET response was neither 200 nor 206.
    #[error("download failed with HTTP {status} for {remote_path}")]
    HttpStatus {
        /// The remote path that failed to download.
        remote_path: String,
        /// The HTTP status code received.
        status: u16,
    },

    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout downloading {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// File system error during download (create dir, open file, write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates an HTTP status error.
    pub fn http_status(remote_path: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            remote_path: remote_path.into(),
            status,
        }
    }

    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// Note on From trait implementations: we intentionally do NOT implement
// `From<reqwest::Error>` or `From<std::io::Error>` because the variants
// require context (url, path) that the source errors don't carry. The
// constructor helpers are the pattern used throughout this crate.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_failed_display() {
        let error = WebdavError::listing_failed("https://host/public.php/webdav/", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected status in: {msg}");
        assert!(msg.contains("public.php/webdav"), "Expected URL in: {msg}");
    }

    #[test]
    fn test_webdav_timeout_display() {
        let error = WebdavError::timeout("https://host/public.php/webdav/sub/");
        assert!(error.to_string().contains("timeout"));
        assert!(error.to_string().contains("/sub/"));
    }

    #[test]
    fn test_xml_error_display() {
        let error = WebdavError::xml("unexpected end of document");
        let msg = error.to_string();
        assert!(msg.contains("multi-status"), "Expected context in: {msg}");
        assert!(msg.contains("unexpected end"), "Expected detail in: {msg}");
    }

    #[test]
    fn test_download_http_status_display() {
        let error = DownloadError::http_status("/sub/b.txt", 500);
        let msg = error.to_string();
        assert!(msg.contains("500"), "Expected status in: {msg}");
        assert!(msg.contains("/sub/b.txt"), "Expected remote path in: {msg}");
    }

    #[test]
    fn test_download_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/out/b.txt"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/out/b.txt"), "Expected path in: {msg}");
    }
}

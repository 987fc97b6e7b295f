//! Share-link parsing: decomposes a Nextcloud public-share URL into the
//! pieces the WebDAV endpoint needs.
//!
//! A share link has the form
//! `{scheme}://{host}[/index.php]/s/{token}[?path={subdir}]`. The host
//! (with any trailing `/index.php` stripped), the opaque share token and
//! the optional, URL-decoded sub-path are extracted here once per run;
//! the result is immutable afterwards.

use thiserror::Error;
use url::Url;

/// Location of a public share: where the server is, which share to open,
/// and which sub-folder of the share to start from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLocation {
    /// Base URL of the Nextcloud instance, without `/index.php` and
    /// without the `/s/{token}` suffix (e.g. `https://cloud.example.com`).
    pub host_url: String,
    /// Opaque share token, used as the Basic-auth username against the
    /// share's WebDAV endpoint. Never empty.
    pub token: String,
    /// Sub-folder of the share to start from, URL-decoded. Empty when the
    /// link points at the share root.
    pub subdir: String,
}

/// Errors produced while parsing a share link.
#[derive(Debug, Error)]
pub enum ShareUrlError {
    /// The input is not an HTTP(S) URL at all.
    #[error("'{url}' is not a valid HTTP(S) URL")]
    InvalidUrl {
        /// The rejected input string.
        url: String,
    },

    /// The input is a URL but carries no `/s/{token}` share segment.
    #[error("'{url}' is not a Nextcloud share link (no /s/ segment)")]
    NotAShareLink {
        /// The rejected input string.
        url: String,
    },
}

impl ShareUrlError {
    /// Creates an invalid-URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a not-a-share-link error.
    pub fn not_a_share_link(url: impl Into<String>) -> Self {
        Self::NotAShareLink { url: url.into() }
    }
}

/// Parses a Nextcloud public-share URL into a [`ShareLocation`].
///
/// The token is the path segment immediately following `/s/`, terminated
/// at the first `?` or `/`. The host is everything before `/s/`, with a
/// trailing `/index.php` stripped (legacy URL rewriting variant). When a
/// `path=` query parameter is present, its decoded value becomes the
/// sub-folder to start from.
///
/// # Errors
///
/// Returns [`ShareUrlError::InvalidUrl`] when the input is not an HTTP(S)
/// URL, and [`ShareUrlError::NotAShareLink`] when it contains no `/s/`
/// segment or the token after it is empty.
pub fn parse_share_url(share_url: &str) -> Result<ShareLocation, ShareUrlError> {
    let parsed = Url::parse(share_url).map_err(|_| ShareUrlError::invalid_url(share_url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ShareUrlError::invalid_url(share_url));
    }

    let Some((head, tail)) = share_url.split_once("/s/") else {
        return Err(ShareUrlError::not_a_share_link(share_url));
    };

    let token = tail.split(['?', '/']).next().unwrap_or_default();
    if token.is_empty() {
        return Err(ShareUrlError::not_a_share_link(share_url));
    }

    let host_url = head.strip_suffix("/index.php").unwrap_or(head);

    let subdir = parsed
        .query_pairs()
        .find(|(key, _)| key == "path")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default();

    Ok(ShareLocation {
        host_url: host_url.to_string(),
        token: token.to_string(),
        subdir,
    })
}

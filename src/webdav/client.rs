//! HTTP client for a single public share.
//!
//! `ShareClient` wraps a pooled `reqwest::Client` together with the share
//! location and password, and issues every request with the Basic-auth
//! credentials the public endpoint expects (username = share token). It
//! is designed to be created once per run and reused for the whole crawl,
//! taking advantage of connection pooling.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use tracing::{debug, instrument};

use super::error::WebdavError;
use super::xml::{Listing, parse_listing};
use crate::share::ShareLocation;

/// Default HTTP connect timeout (30 seconds).
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes for large files).
const READ_TIMEOUT_SECS: u64 = 300;

/// PROPFIND body requesting the properties the listing consumes.
const PROPFIND_BODY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<d:propfind xmlns:d="DAV:">
    <d:prop xmlns:oc="http://owncloud.org/ns">
        <d:getlastmodified/>
        <d:getcontentlength/>
        <d:getcontenttype/>
    </d:prop>
</d:propfind>"#;

/// Client for one public share's WebDAV endpoint.
#[derive(Debug, Clone)]
pub struct ShareClient {
    http: Client,
    location: ShareLocation,
    password: String,
}

impl ShareClient {
    /// Creates a client for the given share.
    ///
    /// Default configuration:
    /// - Connect timeout: 30 seconds
    /// - Read timeout: 5 minutes (for large files)
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(location: ShareLocation, password: impl Into<String>) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            http,
            location,
            password: password.into(),
        }
    }

    /// Returns the share location this client talks to.
    #[must_use]
    pub fn location(&self) -> &ShareLocation {
        &self.location
    }

    /// Builds the full request URL for a path under the share's WebDAV root.
    #[must_use]
    pub(crate) fn webdav_url(&self, path: &str) -> String {
        format!("{}/public.php/webdav{}", self.location.host_url, path)
    }

    /// Starts a request with the share's Basic-auth credentials and the
    /// `X-Requested-With` header the public endpoint requires.
    pub(crate) fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .basic_auth(&self.location.token, Some(self.password.as_str()))
            .header("X-Requested-With", "XMLHttpRequest")
    }

    /// Lists one collection of the share via PROPFIND with `Depth: 1`.
    ///
    /// `folder` is the absolute path under the share's WebDAV root (always
    /// starting and ending with `/`; the share sub-path, when present, is
    /// already part of it).
    ///
    /// # Errors
    ///
    /// Returns [`WebdavError::ListingFailed`] when the server answers with
    /// anything other than 207 Multi-Status, [`WebdavError::Timeout`] /
    /// [`WebdavError::Network`] on transport failures, and
    /// [`WebdavError::Xml`] when the body cannot be parsed.
    #[instrument(skip(self), fields(folder = %folder))]
    pub async fn list(&self, folder: &str) -> Result<Listing, WebdavError> {
        let url = self.webdav_url(folder);
        debug!(url = %url, "listing collection");

        let response = self
            .request(propfind_method(), &url)
            .header("Depth", "1")
            .body(PROPFIND_BODY)
            .send()
            .await
            .map_err(|e| listing_transport_error(&url, e))?;

        let status = response.status().as_u16();
        if status != 207 {
            return Err(WebdavError::listing_failed(&url, status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| listing_transport_error(&url, e))?;

        let base_prefix = format!("/public.php/webdav{folder}");
        let listing = parse_listing(&body, &base_prefix)?;
        debug!(
            files = listing.files.len(),
            folders = listing.folders.len(),
            "collection listed"
        );
        Ok(listing)
    }
}

/// PROPFIND is not one of the named `Method` constants.
#[allow(clippy::expect_used)]
fn propfind_method() -> Method {
    Method::from_bytes(b"PROPFIND").expect("PROPFIND is a valid method token")
}

fn listing_transport_error(url: &str, error: reqwest::Error) -> WebdavError {
    if error.is_timeout() {
        WebdavError::timeout(url)
    } else {
        WebdavError::network(url, error)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn location() -> ShareLocation {
        ShareLocation {
            host_url: "https://cloud.example.com".to_string(),
            token: "TOKEN123".to_string(),
            subdir: String::new(),
        }
    }

    #[test]
    fn test_webdav_url_joins_root() {
        let client = ShareClient::new(location(), "");
        assert_eq!(
            client.webdav_url("/"),
            "https://cloud.example.com/public.php/webdav/"
        );
    }

    #[test]
    fn test_webdav_url_joins_nested_path() {
        let client = ShareClient::new(location(), "pw");
        assert_eq!(
            client.webdav_url("/sub/b.txt"),
            "https://cloud.example.com/public.php/webdav/sub/b.txt"
        );
    }

    #[test]
    fn test_propfind_method_is_valid() {
        assert_eq!(propfind_method().as_str(), "PROPFIND");
    }

    #[tokio::test]
    async fn test_list_propagates_non_207_status() {
        use wiremock::matchers::path;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(path("/public.php/webdav/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = ShareClient::new(
            ShareLocation {
                host_url: server.uri(),
                token: "TOKEN".to_string(),
                subdir: String::new(),
            },
            "wrong",
        );

        let result = client.list("/").await;
        match result {
            Err(WebdavError::ListingFailed { status, .. }) => assert_eq!(status, 401),
            other => panic!("Expected ListingFailed, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_sends_depth_and_auth_headers() {
        use wiremock::matchers::{header, header_exists, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let body = r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:">
  <d:response><d:href>/public.php/webdav/</d:href></d:response>
  <d:response>
    <d:href>/public.php/webdav/a.txt</d:href>
    <d:propstat>
      <d:prop><d:getcontentlength>100</d:getcontentlength></d:prop>
      <d:status>HTTP/1.1 200 OK</d:status>
    </d:propstat>
  </d:response>
</d:multistatus>"#;

        let server = MockServer::start().await;
        Mock::given(path("/public.php/webdav/"))
            .and(header("Depth", "1"))
            .and(header("X-Requested-With", "XMLHttpRequest"))
            .and(header_exists("Authorization"))
            .respond_with(ResponseTemplate::new(207).set_body_string(body))
            .expect(1)
            .mount(&server)
            .await;

        let client = ShareClient::new(
            ShareLocation {
                host_url: server.uri(),
                token: "TOKEN".to_string(),
                subdir: String::new(),
            },
            "",
        );

        let listing = client.list("/").await.unwrap();
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "a.txt");
        assert_eq!(listing.files[0].size, 100);
    }
}

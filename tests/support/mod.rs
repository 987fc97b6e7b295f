//! Shared helpers for integration tests: multi-status body builders and
//! mock share endpoints.

#![allow(dead_code)]

use nextload_core::{ShareClient, ShareLocation};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wraps response fragments into a DAV multi-status document.
pub fn multistatus(responses: &[String]) -> String {
    format!(
        r#"<?xml version="1.0"?>
<d:multistatus xmlns:d="DAV:" xmlns:s="http://sabredav.org/ns" xmlns:oc="http://owncloud.org/ns">
{}
</d:multistatus>"#,
        responses.join("\n")
    )
}

/// A file `response` element with the properties Nextcloud sends.
pub fn file_response(href: &str, length: u64) -> String {
    format!(
        r#"<d:response>
  <d:href>{href}</d:href>
  <d:propstat>
    <d:prop>
      <d:getlastmodified>Mon, 01 Jan 2024 10:00:00 GMT</d:getlastmodified>
      <d:getcontentlength>{length}</d:getcontentlength>
      <d:getcontenttype>application/octet-stream</d:getcontenttype>
    </d:prop>
    <d:status>HTTP/1.1 200 OK</d:status>
  </d:propstat>
</d:response>"#
    )
}

/// A folder `response` element (collection resourcetype, no length).
pub fn folder_response(href: &str) -> String {
    format!(
        r#"<d:response>
  <d:href>{href}</d:href>
  <d:propstat>
    <d:prop>
      <d:getlastmodified>Mon, 01 Jan 2024 10:00:00 GMT</d:getlastmodified>
      <d:resourcetype><d:collection/></d:resourcetype>
    </d:prop>
    <d:status>HTTP/1.1 200 OK</d:status>
  </d:propstat>
</d:response>"#
    )
}

/// Mounts a PROPFIND mock for one collection path.
pub async fn mount_listing(server: &MockServer, collection_path: &str, body: String) {
    Mock::given(method("PROPFIND"))
        .and(path(collection_path))
        .respond_with(ResponseTemplate::new(207).set_body_string(body))
        .mount(server)
        .await;
}

/// Mounts HEAD and GET mocks for one file path with the given content.
pub async fn mount_file(server: &MockServer, file_path: &str, content: &[u8]) {
    Mock::given(method("HEAD"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Builds a client pointed at the mock server's share root.
pub fn share_client(server: &MockServer) -> ShareClient {
    share_client_with_subdir(server, "")
}

/// Builds a client whose share link carried a `path=` sub-folder.
pub fn share_client_with_subdir(server: &MockServer, subdir: &str) -> ShareClient {
    ShareClient::new(
        ShareLocation {
            host_url: server.uri(),
            token: "TOKEN".to_string(),
            subdir: subdir.to_string(),
        },
        "",
    )
}

//! Parsing of WebDAV multi-status (207) bodies into typed listings.
//!
//! The public-share endpoint answers PROPFIND with a `DAV:` multi-status
//! document. Each `response` element carries an `href` plus property
//! blocks; only `href` and `getcontentlength` are consumed here. Entries
//! are classified by their trailing separator: an href ending in `/` is a
//! folder, anything else a file.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{trace, warn};

use super::error::WebdavError;

/// A file entry in a listed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Name of the file, relative to the listed collection (single path
    /// segment, percent-decoded).
    pub name: String,
    /// Size in bytes from `getcontentlength`, 0 when absent or unparsable.
    pub size: u64,
}

/// Contents of one WebDAV collection, in server response order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Files directly inside the collection.
    pub files: Vec<FileEntry>,
    /// Sub-folders directly inside the collection; names keep their
    /// trailing `/`.
    pub folders: Vec<String>,
}

/// One `response` element, accumulated while walking the document.
#[derive(Debug, Default)]
struct RawResponse {
    href: String,
    content_length: Option<u64>,
}

/// Path prefix the share endpoint serves collections under.
const WEBDAV_ROOT: &str = "/public.php/webdav";

/// Parses a multi-status body into a [`Listing`].
///
/// `base_prefix` is the decoded href prefix of the listed collection
/// (e.g. `/public.php/webdav/sub/`). Entries outside that prefix and the
/// collection's self-entry are discarded. Entry names that still contain
/// a path separator after stripping the prefix are dropped with a
/// warning: a `Depth: 1` child is a single segment, and anything else
/// must not escape the destination directory.
pub(crate) fn parse_listing(xml_text: &str, base_prefix: &str) -> Result<Listing, WebdavError> {
    let mut reader = Reader::from_str(xml_text);
    reader.config_mut().trim_text(true);

    let mut listing = Listing::default();
    let mut current: Option<RawResponse> = None;
    let mut current_element = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e) | Event::Empty(e)) => {
                let name = local_name(e.name().local_name().as_ref());
                if name == "response" {
                    current = Some(RawResponse::default());
                } else {
                    current_element = name;
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| WebdavError::xml(e.to_string()))?
                    .to_string();
                if let Some(ref mut response) = current {
                    match current_element.as_str() {
                        "href" => response.href = text.trim().to_string(),
                        "getcontentlength" => {
                            response.content_length = text.trim().parse().ok();
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::End(e)) => {
                if local_name(e.name().local_name().as_ref()) == "response" {
                    if let Some(response) = current.take() {
                        push_entry(&mut listing, &response, base_prefix);
                    }
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WebdavError::xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(listing)
}

fn local_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

fn push_entry(listing: &mut Listing, response: &RawResponse, base_prefix: &str) {
    let href = urlencoding::decode(&response.href)
        .map_or_else(|_| response.href.clone(), std::borrow::Cow::into_owned);

    if !href.starts_with(WEBDAV_ROOT) {
        trace!(href = %href, "discarding entry outside the WebDAV root");
        return;
    }
    let Some(name) = href.strip_prefix(base_prefix) else {
        trace!(href = %href, "discarding entry outside the listed collection");
        return;
    };
    if name.is_empty() {
        // the collection's own self-entry
        return;
    }

    let stem = name.trim_end_matches('/');
    if stem.is_empty() || stem.contains('/') || stem == ".." {
        warn!(href = %href, "discarding entry with unexpected path shape");
        return;
    }

    if name.ends_with('/') {
        listing.folders.push(name.to_string());
    } else {
        listing.files.push(FileEntry {
            name: name.to_string(),
            size: response.content_length.unwrap_or(0),
        });
    }
}

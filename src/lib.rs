//! Nextload Core Library
//!
//! This library provides the core functionality for the nextload tool,
//! which retrieves the contents of password-protected Nextcloud public
//! shares over WebDAV: it discovers the share's file/folder tree and
//! either lists it (with sizes) or downloads it, resuming partial
//! transfers from their on-disk size.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`share`] - Share-link parsing (host, token, optional sub-path)
//! - [`filter`] - Include/exclude glob filtering of file names
//! - [`webdav`] - PROPFIND directory listing and resumable file download
//! - [`crawl`] - Recursive depth-first traversal over the share tree
//! - [`size`] - Human-readable byte size formatting

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod crawl;
pub mod filter;
pub mod share;
pub mod size;
pub mod webdav;

// Re-export commonly used types
pub use crawl::{CrawlStats, Crawler, ListEntry};
pub use filter::{FilterError, FilterSpec};
pub use share::{ShareLocation, ShareUrlError, parse_share_url};
pub use size::format_size;
pub use webdav::{
    DownloadError, DownloadOutcome, FileEntry, Listing, NoProgress, ShareClient, TransferProgress,
    WebdavError,
};

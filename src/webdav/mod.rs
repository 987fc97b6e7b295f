//! WebDAV access to a Nextcloud public share.
//!
//! This module speaks the small WebDAV subset the public-share endpoint
//! exposes: PROPFIND with `Depth: 1` to enumerate a collection, HEAD to
//! probe a file's size, and GET (optionally ranged) to fetch its bytes.
//! All requests authenticate with HTTP Basic auth, username = share
//! token, password = share password (empty allowed).
//!
//! # Features
//!
//! - Typed directory listings (files with byte sizes, folders)
//! - Streaming downloads that resume from the local on-disk size
//! - Explicit 206-vs-200 handling: ranged responses append, full
//!   responses truncate, so a server that ignores the range request can
//!   never duplicate already-present bytes
//! - Structured error types with full context

mod client;
mod download;
mod error;
mod xml;

pub use client::ShareClient;
pub use download::{DownloadOutcome, NoProgress, TransferProgress};
pub use error::{DownloadError, WebdavError};
pub use xml::{FileEntry, Listing};

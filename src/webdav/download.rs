//! Resumable single-file download.
//!
//! A download first probes the remote size with HEAD, skips the transfer
//! entirely when the local copy is already complete, and otherwise issues
//! a GET with a `Range` header starting at the local on-disk size. The
//! response status decides how the local file is opened: 206 appends to
//! the partial file, 200 means the server sent the full body (it ignored
//! or never saw the range) and the file is truncated first.

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Method;
use reqwest::header::{CONTENT_LENGTH, RANGE};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};

use super::client::ShareClient;
use super::error::DownloadError;

/// Result of a single file download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Bytes were transferred; `resumed` is true when the server honored
    /// the range request with a 206 and the partial file was appended to.
    Downloaded {
        /// Final local file size in bytes.
        bytes: u64,
        /// Whether an HTTP range resume was used.
        resumed: bool,
    },
    /// The local file already covered the remote size; no GET was issued
    /// and the file was left untouched.
    AlreadyComplete {
        /// Current local file size in bytes.
        bytes: u64,
    },
}

/// Observer for per-file transfer progress.
///
/// The library ships [`NoProgress`]; the CLI provides an implementation
/// that draws a progress bar.
pub trait TransferProgress: Send + Sync {
    /// A transfer is starting. `resume_from` is the byte offset already
    /// present locally (0 for a fresh download); `total_bytes` is the
    /// expected final size when known.
    fn begin(&self, local_path: &Path, resume_from: u64, total_bytes: Option<u64>);
    /// A chunk of `bytes` was written to disk.
    fn advance(&self, bytes: u64);
    /// The transfer finished (successfully or not).
    fn finish(&self);
}

/// No-op progress observer for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl TransferProgress for NoProgress {
    fn begin(&self, _local_path: &Path, _resume_from: u64, _total_bytes: Option<u64>) {}
    fn advance(&self, _bytes: u64) {}
    fn finish(&self) {}
}

impl ShareClient {
    /// Downloads one remote file to `local_path`, resuming from the
    /// existing local byte offset when possible.
    ///
    /// `remote_path` is absolute under the share's WebDAV root (share
    /// sub-path included), e.g. `/sub/b.txt`.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::HttpStatus`] when the GET answers with
    /// anything other than 200 or 206, [`DownloadError::Timeout`] /
    /// [`DownloadError::Network`] on transport failures, and
    /// [`DownloadError::Io`] when the local file cannot be written. All
    /// of these are per-file: callers log them and continue.
    #[instrument(skip(self, progress), fields(remote_path = %remote_path))]
    pub async fn download_file(
        &self,
        remote_path: &str,
        local_path: &Path,
        progress: &dyn TransferProgress,
    ) -> Result<DownloadOutcome, DownloadError> {
        let local_size = tokio::fs::metadata(local_path).await.map(|m| m.len()).ok();
        let file_exists = local_size.is_some();
        let local_size = local_size.unwrap_or(0);

        let url = self.webdav_url(remote_path);
        let remote_size = self.probe_remote_size(&url).await?;

        // A missing Content-Length means "unknown", not "empty": only a
        // known remote size can prove the local copy complete.
        if file_exists && is_already_complete(local_size, remote_size) {
            info!(
                path = %local_path.display(),
                bytes = local_size,
                "local copy already complete, skipping"
            );
            return Ok(DownloadOutcome::AlreadyComplete { bytes: local_size });
        }

        debug!(
            url = %url,
            local_size,
            remote_size = ?remote_size,
            "starting transfer"
        );

        let mut request = self.request(Method::GET, &url);
        if local_size > 0 {
            request = request.header(RANGE, format!("bytes={local_size}-"));
        }
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status().as_u16();
        // Only a 206 proves the server honored the range; any other
        // success means a full body, which must replace, not extend,
        // the local file.
        let resumed = status == 206;
        if status != 200 && !resumed {
            return Err(DownloadError::http_status(remote_path, status));
        }

        if let Some(parent) = local_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DownloadError::io(parent, e))?;
        }

        let mut file = if resumed {
            tokio::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(local_path)
                .await
                .map_err(|e| DownloadError::io(local_path, e))?
        } else {
            File::create(local_path)
                .await
                .map_err(|e| DownloadError::io(local_path, e))?
        };

        let (resume_from, total_bytes) = if resumed {
            (local_size, remote_size)
        } else {
            (0, response.content_length().or(remote_size))
        };
        progress.begin(local_path, resume_from, total_bytes);

        let streamed = stream_to_file(&mut file, response, &url, local_path, progress).await;
        progress.finish();
        let written = streamed?;

        let bytes = if resumed {
            local_size.saturating_add(written)
        } else {
            written
        };

        info!(
            path = %local_path.display(),
            bytes,
            resumed,
            "download complete"
        );

        Ok(DownloadOutcome::Downloaded { bytes, resumed })
    }

    /// Probes the remote file size with a metadata-only HEAD request.
    ///
    /// Returns `None` when the Content-Length header is absent (or the
    /// probe itself was answered with an error status; the following GET
    /// will surface the real failure).
    async fn probe_remote_size(&self, url: &str) -> Result<Option<u64>, DownloadError> {
        let response = self
            .request(Method::HEAD, url)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        if !response.status().is_success() {
            debug!(url = %url, status = response.status().as_u16(), "size probe failed");
            return Ok(None);
        }

        Ok(content_length_from_headers(response.headers()))
    }
}

fn content_length_from_headers(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// A known remote size fully covered by the local file means the
/// download is done. An unknown size never does.
fn is_already_complete(local_size: u64, remote_size: Option<u64>) -> bool {
    remote_size.is_some_and(|remote| local_size >= remote)
}

fn transport_error(url: &str, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url)
    } else {
        DownloadError::network(url, error)
    }
}

/// Streams the response body to the file in chunks, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    local_path: &Path,
    progress: &dyn TransferProgress,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(local_path, e))?;
        bytes_written += chunk.len() as u64;
        progress.advance(chunk.len() as u64);
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(local_path, e))?;

    Ok(bytes_written)
}

//! Recursive depth-first traversal of a share tree.
//!
//! At each folder the crawler lists the collection once, handles the
//! files (filtered, then reported or downloaded), and only then recurses
//! into sub-folders, so a folder's listing always happens before any of
//! its children are visited. Traversal is strictly sequential: one HTTP
//! request in flight at a time, files before sub-folders, in server
//! response order. Each recursive call owns its own remote/local path
//! state; there is no shared mutable traversal state across branches.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use tracing::{debug, info, warn};

use crate::filter::FilterSpec;
use crate::webdav::{DownloadOutcome, ShareClient, TransferProgress, WebdavError};

/// One reportable entry produced by a listing crawl, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry {
    /// A file that passed the filter.
    File {
        /// Nesting depth below the share root (0 for the root's children).
        depth: usize,
        /// File name relative to its folder.
        name: String,
        /// Size in bytes.
        size: u64,
    },
    /// A folder about to be recursed into. Folders are always reported;
    /// filters apply to file names only.
    Folder {
        /// Nesting depth below the share root.
        depth: usize,
        /// Folder name with its trailing `/`.
        name: String,
    },
}

/// Counters accumulated over one download crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Files transferred (fully or resumed).
    pub downloaded: u64,
    /// Files skipped because the local copy already covered the remote size.
    pub up_to_date: u64,
    /// Files rejected by the include/exclude filter.
    pub filtered: u64,
    /// Files whose download failed; the crawl continued past them.
    pub failed: u64,
    /// Total bytes now present locally for transferred files.
    pub bytes: u64,
}

type CrawlFuture<'a> = Pin<Box<dyn Future<Output = Result<(), WebdavError>> + Send + 'a>>;

/// Depth-first crawler over one share.
#[derive(Debug, Clone, Copy)]
pub struct Crawler<'a> {
    client: &'a ShareClient,
    filter: &'a FilterSpec,
}

impl<'a> Crawler<'a> {
    /// Creates a crawler over `client`'s share with the given filter.
    #[must_use]
    pub fn new(client: &'a ShareClient, filter: &'a FilterSpec) -> Self {
        Self { client, filter }
    }

    /// Root folder of the traversal: the share sub-path when the link
    /// carried one, normalized to `/.../` form, else `/`.
    fn root_folder(&self) -> String {
        let subdir = self.client.location().subdir.trim_matches('/');
        if subdir.is_empty() {
            "/".to_string()
        } else {
            format!("/{subdir}/")
        }
    }

    /// Walks the share and feeds every reportable entry to `sink`, in
    /// depth-first order (files before sub-folders at each level).
    ///
    /// # Errors
    ///
    /// Any listing failure aborts the walk and is returned as-is.
    pub async fn list(
        &self,
        sink: &mut impl FnMut(ListEntry),
    ) -> Result<(), WebdavError> {
        self.list_folder(self.root_folder(), 0, sink).await
    }

    fn list_folder<'s, F>(
        &'s self,
        folder: String,
        depth: usize,
        sink: &'s mut F,
    ) -> Pin<Box<dyn Future<Output = Result<(), WebdavError>> + 's>>
    where
        F: FnMut(ListEntry),
    {
        Box::pin(async move {
            let listing = self.client.list(&folder).await?;

            for file in &listing.files {
                if self.filter.should_include(&file.name) {
                    sink(ListEntry::File {
                        depth,
                        name: file.name.clone(),
                        size: file.size,
                    });
                }
            }

            for sub in &listing.folders {
                sink(ListEntry::Folder {
                    depth,
                    name: sub.clone(),
                });
                self.list_folder(format!("{folder}{sub}"), depth + 1, sink)
                    .await?;
            }

            Ok(())
        })
    }

    /// Walks the share and downloads every accepted file under
    /// `output_dir`, mirroring the remote folder nesting. Per-file
    /// failures are logged and counted but do not stop the walk.
    ///
    /// # Errors
    ///
    /// Any listing failure aborts the walk and is returned as-is.
    pub async fn download(
        &self,
        output_dir: &Path,
        progress: &dyn TransferProgress,
    ) -> Result<CrawlStats, WebdavError> {
        let mut stats = CrawlStats::default();
        self.download_folder(
            self.root_folder(),
            output_dir.to_path_buf(),
            progress,
            &mut stats,
        )
        .await?;
        Ok(stats)
    }

    fn download_folder<'s>(
        &'s self,
        folder: String,
        local_base: PathBuf,
        progress: &'s dyn TransferProgress,
        stats: &'s mut CrawlStats,
    ) -> CrawlFuture<'s> {
        Box::pin(async move {
            let listing = self.client.list(&folder).await?;

            for file in &listing.files {
                if !self.filter.should_include(&file.name) {
                    stats.filtered += 1;
                    continue;
                }

                let remote_path = format!("{folder}{}", file.name);
                let local_path = local_base.join(&file.name);
                match self
                    .client
                    .download_file(&remote_path, &local_path, progress)
                    .await
                {
                    Ok(DownloadOutcome::Downloaded { bytes, resumed }) => {
                        stats.downloaded += 1;
                        stats.bytes += bytes;
                        debug!(
                            remote_path = %remote_path,
                            bytes,
                            resumed,
                            "file transferred"
                        );
                    }
                    Ok(DownloadOutcome::AlreadyComplete { .. }) => {
                        stats.up_to_date += 1;
                    }
                    Err(error) => {
                        stats.failed += 1;
                        warn!(
                            remote_path = %remote_path,
                            error = %error,
                            "download failed, continuing with next file"
                        );
                    }
                }
            }

            for sub in &listing.folders {
                info!(folder = %sub, "entering folder");
                let local_dir = local_base.join(sub.trim_end_matches('/'));
                self.download_folder(format!("{folder}{sub}"), local_dir, progress, stats)
                    .await?;
            }

            Ok(())
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::share::ShareLocation;

    fn client_with_subdir(subdir: &str) -> ShareClient {
        ShareClient::new(
            ShareLocation {
                host_url: "https://host".to_string(),
                token: "TOKEN".to_string(),
                subdir: subdir.to_string(),
            },
            "",
        )
    }

    #[test]
    fn test_root_folder_without_subdir() {
        let client = client_with_subdir("");
        let filter = FilterSpec::default();
        let crawler = Crawler::new(&client, &filter);
        assert_eq!(crawler.root_folder(), "/");
    }

    #[test]
    fn test_root_folder_normalizes_subdir() {
        let filter = FilterSpec::default();

        let client = client_with_subdir("/sub");
        assert_eq!(Crawler::new(&client, &filter).root_folder(), "/sub/");

        let client = client_with_subdir("sub/nested/");
        assert_eq!(Crawler::new(&client, &filter).root_folder(), "/sub/nested/");
    }

    #[test]
    fn test_crawl_stats_default_is_zeroed() {
        let stats = CrawlStats::default();
        assert_eq!(stats.downloaded, 0);
        assert_eq!(stats.failed, 0);
        assert_eq!(stats.bytes, 0);
    }
}

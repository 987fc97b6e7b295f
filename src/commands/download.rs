//! `download` subcommand: mirror the share tree into a local directory.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nextload_core::{Crawler, TransferProgress, format_size};
use tracing::{info, warn};

use crate::cli::ShareArgs;

pub async fn run_download_command(share: &ShareArgs, output_dir: &Path) -> Result<()> {
    let (client, filter) = super::prepare(share)?;
    info!(output_dir = %output_dir.display(), "Output directory");

    let crawler = Crawler::new(&client, &filter);
    let progress = BarProgress::new();

    let stats = crawler
        .download(output_dir, &progress)
        .await
        .context("failed to crawl share contents")?;

    info!(
        downloaded = stats.downloaded,
        up_to_date = stats.up_to_date,
        filtered = stats.filtered,
        failed = stats.failed,
        bytes = stats.bytes,
        "Crawl complete"
    );

    println!(
        "Downloaded {} file(s) ({}), {} already up-to-date, {} filtered out, {} failed.",
        stats.downloaded,
        format_size(stats.bytes),
        stats.up_to_date,
        stats.filtered,
        stats.failed
    );

    if stats.failed > 0 {
        warn!(
            failed = stats.failed,
            "some files failed to download; re-run to retry them"
        );
    }

    Ok(())
}

/// Per-file progress bar driven by the crawler's transfer callbacks.
///
/// One bar exists at a time (transfers are sequential); it is created on
/// `begin` and torn down on `finish`.
struct BarProgress {
    current: Mutex<Option<ProgressBar>>,
}

impl BarProgress {
    fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TransferProgress for BarProgress {
    fn begin(&self, local_path: &Path, resume_from: u64, total_bytes: Option<u64>) {
        let name = local_path
            .file_name()
            .map_or_else(|| local_path.display().to_string(), |n| {
                n.to_string_lossy().to_string()
            });

        let bar = match total_bytes {
            Some(total) => {
                let bar = ProgressBar::new(total);
                bar.set_style(
                    ProgressStyle::with_template("{msg} [{bar:30}] {bytes}/{total_bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                bar.set_position(resume_from);
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner} {msg} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(name);

        *self.lock() = Some(bar);
    }

    fn advance(&self, bytes: u64) {
        if let Some(bar) = self.lock().as_ref() {
            bar.inc(bytes);
        }
    }

    fn finish(&self) {
        if let Some(bar) = self.lock().take() {
            bar.finish_and_clear();
        }
    }
}

//! CLI command handlers.

mod download;
mod list;

pub use download::run_download_command;
pub use list::run_list_command;

use anyhow::Result;
use nextload_core::{FilterSpec, ShareClient, ShareLocation, parse_share_url};
use tracing::info;

use crate::cli::ShareArgs;

/// Shared setup for both subcommands: parse the share link, compile the
/// filters, build the authenticated client. Any failure here is fatal.
fn prepare(share: &ShareArgs) -> Result<(ShareClient, FilterSpec)> {
    let location: ShareLocation = parse_share_url(&share.url)?;
    info!(
        host = %location.host_url,
        token = %location.token,
        subdir = %location.subdir,
        "Parsed share link"
    );

    if !share.include.is_empty() {
        info!(patterns = %share.include.join(", "), "Include patterns");
    }
    if !share.exclude.is_empty() {
        info!(patterns = %share.exclude.join(", "), "Exclude patterns");
    }

    let filter = FilterSpec::new(&share.include, &share.exclude)?;
    let client = ShareClient::new(location, share.password.clone());
    Ok((client, filter))
}

//! `list` subcommand: print the share tree with file sizes.

use anyhow::{Context, Result};
use nextload_core::{Crawler, ListEntry, format_size};

use crate::cli::ShareArgs;

pub async fn run_list_command(share: &ShareArgs) -> Result<()> {
    let (client, filter) = super::prepare(share)?;
    let crawler = Crawler::new(&client, &filter);

    crawler
        .list(&mut print_entry)
        .await
        .context("failed to list share contents")?;

    Ok(())
}

fn print_entry(entry: ListEntry) {
    match entry {
        ListEntry::File { depth, name, size } => {
            println!("{}📄 {} ({})", "  ".repeat(depth), name, format_size(size));
        }
        ListEntry::Folder { depth, name } => {
            println!("{}📁 {}", "  ".repeat(depth), name);
        }
    }
}

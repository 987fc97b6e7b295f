//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Download and list the contents of Nextcloud public shares.
///
/// Nextload talks to a share's WebDAV endpoint directly: point it at a
/// public share link (password-protected or not) and it will walk the
/// shared tree, either printing it or mirroring it locally with
/// resumable transfers.
#[derive(Parser, Debug)]
#[command(name = "nextload")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download files from a share into a local directory
    Download {
        #[command(flatten)]
        share: ShareArgs,

        /// Local directory to save files into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// List the share's files and folders with sizes
    List {
        #[command(flatten)]
        share: ShareArgs,
    },
}

/// Arguments common to both subcommands.
#[derive(clap::Args, Debug)]
pub struct ShareArgs {
    /// Nextcloud share URL
    #[arg(short, long)]
    pub url: String,

    /// Share password (if required)
    #[arg(short, long, default_value = "")]
    pub password: String,

    /// File pattern to include (repeatable, e.g. *.hdf5)
    #[arg(short, long)]
    pub include: Vec<String>,

    /// File pattern to exclude (repeatable, e.g. *.txt)
    #[arg(short, long)]
    pub exclude: Vec<String>,
}

//! Command-line arguments.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Filter, sort and page a JSON table.
///
/// Each flag replays the operation a table UI would perform: `--query` is
/// typing into the search box, each `--sort` is a header click, `--select`
/// ticks a row checkbox and `--select-page` ticks the header checkbox.
#[derive(Debug, Parser)]
#[command(name = "tabula", version)]
pub struct Args {
    /// JSON file holding an array of row objects.
    pub rows: PathBuf,

    /// Columns to show and search, comma separated. Defaults to every key
    /// found in the rows, `id` first.
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<String>,

    /// Free-text query matched against every column.
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Sort column. Repeat the same key to flip the direction.
    #[arg(short, long = "sort", value_name = "KEY")]
    pub sort: Vec<String>,

    /// Page number to show (1-based).
    #[arg(short, long, default_value = "1")]
    pub page: NonZeroUsize,

    /// Rows per page. Overrides the config file.
    #[arg(long)]
    pub page_size: Option<NonZeroUsize>,

    /// Toggle selection of a row id. `#N` names the row at source index N.
    #[arg(long = "select", value_name = "ID")]
    pub select: Vec<String>,

    /// Toggle selection of every row on the shown page.
    #[arg(long)]
    pub select_page: bool,

    /// JSON table config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

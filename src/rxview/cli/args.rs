use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rxview")]
#[command(version)]
#[command(about = "Tab, facet and search views over regulatory record exports", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Records file: a JSON array or an object wrapping one
    #[arg(short, long, global = true, env = "RXVIEW_RECORDS")]
    pub records: Option<PathBuf>,

    /// View definition file (overrides --preset)
    #[arg(short, long, global = true, env = "RXVIEW_DEFINITION")]
    pub definition: Option<PathBuf>,

    /// Built-in view definition (otc, fda, tasks)
    #[arg(short, long, global = true)]
    pub preset: Option<String>,

    /// Reference date for date-based tabs (defaults to now)
    #[arg(long, global = true, value_name = "DATE")]
    pub now: Option<String>,

    /// Use global settings instead of the project's
    #[arg(short, long, global = true)]
    pub global: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Active tab id
    #[arg(short, long)]
    pub tab: Option<String>,

    /// Facet choice, repeatable (e.g. -f appType=Initial)
    #[arg(short, long = "facet", value_name = "ID=VALUE")]
    pub facets: Vec<String>,

    /// Select records without a value for this facet
    #[arg(long = "missing", value_name = "ID")]
    pub missing: Vec<String>,

    /// Case-insensitive search text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort field (defaults to the view's default sort)
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the filtered, sorted records
    #[command(alias = "v")]
    View {
        #[command(flatten)]
        filter: FilterArgs,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show facet values and their counts
    Facets {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show tabs and their record counts
    Tabs {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the built-in view definitions
    Presets,

    /// Get or set configuration
    ///
    /// search-debounce-ms is not used by this CLI. It is stored for
    /// applications embedding rxview, which read it as the delay before a
    /// typed search query is applied.
    Config {
        /// Configuration key (page-size, search-debounce-ms, default-preset)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Create the settings directory
    Init,
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for country-card
#[derive(Debug, Parser)]
#[command(
    name = "country-card",
    version,
    about = "CLI for inspecting and rendering the country card block"
)]
pub struct CliArgs {
    /// Log more (repeat for trace output). Overrides RUST_LOG.
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON plugin config (block name, versions, required files)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List selectable countries, optionally filtered by name or code
    Countries {
        /// Accent- and case-insensitive filter (e.g. "isl", "ch")
        #[arg(short = 'f', long = "filter")]
        filter: Option<String>,
    },

    /// Show name, continent and flag for a country code
    Country {
        /// Two-letter code (e.g. CH, us)
        code: String,
    },

    /// Print the flag emoji for a code without checking the table
    Flag {
        code: String,
    },

    /// Print the block.json descriptor
    Metadata,

    /// Render stored block markup from a JSON attributes file
    Render {
        /// File with `{"countryCode": "..", "relatedPosts": [..]}`
        attributes: PathBuf,
    },

    /// Read the attributes back out of stored block markup
    Parse {
        /// File containing the block markup
        markup: PathBuf,
    },

    /// Simulate an editing session: pick a country, fetch related posts from
    /// a JSON posts file, print the stored markup
    Edit {
        /// Country to select
        code: String,

        /// JSON array of post records to search
        #[arg(short = 'p', long = "posts")]
        posts: Option<PathBuf>,

        /// Id of the document being edited (excluded from related posts)
        #[arg(long = "post-id")]
        post_id: Option<u64>,

        /// Existing attributes to open the block with
        #[arg(short = 'a', long = "attributes")]
        attributes: Option<PathBuf>,
    },

    /// Run the startup checks and print the admin notice, if any
    Check {
        /// Directory required files are resolved against
        #[arg(long = "plugin-dir", default_value = ".")]
        plugin_dir: PathBuf,

        /// Version of the runtime the plugin runs on
        #[arg(long = "runtime-version")]
        runtime_version: String,

        /// Version of the host platform
        #[arg(long = "host-version")]
        host_version: String,
    },
}

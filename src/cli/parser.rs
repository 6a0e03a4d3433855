use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for triplogger
#[derive(Parser)]
#[command(
    name = "triplogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simple trip logger: record date, location, miles and reason into a CSV file",
    long_about = None
)]
pub struct Cli {
    /// Use this data file for one run instead of the saved one
    #[arg(global = true, long = "file", value_name = "CSV")]
    pub file: Option<String>,

    /// Override the configuration directory (tests, portable installs)
    #[arg(
        global = true,
        long = "config-dir",
        env = "TRIPLOGGER_CONFIG_DIR",
        hide = true
    )]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the default configuration file (and select --file if given)
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show, select or clear the saved data file
    File {
        /// New data file (created with a header if missing)
        path: Option<String>,

        /// Forget the saved data file
        #[arg(long, conflicts_with = "path")]
        clear: bool,
    },

    /// Validate the data file, creating or migrating it if needed
    Check,

    /// List the quick-entry locations
    Locations,

    /// Record a trip to a known location using its default miles
    Trip {
        /// Location name (see `locations`)
        location: String,

        /// Optional trip reason
        #[arg(long, short)]
        reason: Option<String>,
    },

    /// Record a trip with a custom location and miles
    Custom {
        /// Location name
        location: String,

        /// Miles (free text)
        miles: String,

        /// Optional trip reason
        #[arg(long, short)]
        reason: Option<String>,
    },

    /// Start the interactive trip logger (single instance)
    Run,
}

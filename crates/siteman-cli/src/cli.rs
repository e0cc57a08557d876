use clap::{Parser, Subcommand};
use std::path::PathBuf;

use siteman_core::{ContentType, EphemeralId, Status};

/// Main CLI structure
#[derive(Parser)]
#[command(name = "siteman")]
#[command(about = "Create, list, publish and deploy static-site content")]
#[command(version)]
pub struct Cli {
    /// Project directory containing content/ (overrides SITEMAN_PROJECT)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Remote directory to deploy into (overrides SITEMAN_DEPLOY_PATH)
    #[arg(long, global = true)]
    pub deploy_path: Option<String>,

    /// Remote host to deploy to (overrides SITEMAN_DEPLOY_HOST)
    #[arg(long, global = true)]
    pub deploy_host: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand)]
pub enum Commands {
    /// Create content/posts, content/pages and a .siteman.toml
    Init {
        /// Project directory (defaults to --project or the current directory)
        path: Option<PathBuf>,
    },

    /// Create a new post or page as a draft
    New {
        /// Content type
        #[arg(value_name = "post|page")]
        kind: ContentType,

        /// Title; the filename slug is derived from it
        #[arg(required = true, num_args = 1..)]
        title: Vec<String>,

        /// Do not open the new file in the editor
        #[arg(long)]
        no_edit: bool,
    },

    /// List content with ephemeral IDs
    List {
        /// Optional filters, in any order
        #[arg(value_name = "post|page|draft|public")]
        filters: Vec<String>,

        /// Output as JSON for machine processing
        #[arg(long)]
        json: bool,
    },

    /// Open content in the editor, by ID or through the fuzzy selector
    Edit {
        /// IDs from `siteman list`, or a content type for interactive selection
        #[arg(value_name = "ID...|post|page")]
        targets: Vec<String>,
    },

    /// Show or change the draft/public status of one item
    Status {
        /// ID from `siteman list`
        id: EphemeralId,

        /// New status; omit to show the current one
        #[arg(value_name = "draft|public")]
        status: Option<Status>,
    },

    /// Build the site and sync it to the deploy target
    Deploy {
        /// Forwarded to the sync step only: show what would change
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Print shell completions
    #[cfg(feature = "completions")]
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

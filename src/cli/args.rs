//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum, ValueHint};

use crate::domain::GroupKind;

/// Hierarchical group/organization trees: build, highlight, filter, render
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-d, -dd, -ddd)
    #[arg(short = 'd', long = "debug", action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Group store file (default: from config / ORGTREE_STORE_PATH)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath, env = "ORGTREE_STORE_PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI-facing group kind (maps onto [`GroupKind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Organization,
    Group,
}

impl From<KindArg> for GroupKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Organization => GroupKind::Organization,
            KindArg::Group => GroupKind::Group,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the group forest as an ASCII tree
    Tree {
        /// Group kind to build the forest for
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Keep only branches matching these group names
        #[arg(long = "select")]
        select: Vec<String>,
    },

    /// Render the group forest as nested HTML
    Render {
        /// Group kind to build the forest for
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Highlight these group names
        #[arg(long = "select")]
        select: Vec<String>,
        /// Filter to matching branches instead of highlighting in place
        #[arg(long)]
        filter: bool,
    },

    /// Show the tree section around a group
    Section {
        /// Group name
        name: String,
        /// Group kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
        /// Return only the group's own subtree
        #[arg(long)]
        no_parents: bool,
        /// Prune off-path children of ancestors
        #[arg(long)]
        no_siblings: bool,
        /// Emit HTML instead of an ASCII tree
        #[arg(long)]
        html: bool,
    },

    /// List a group's ancestors, root first
    Parents {
        /// Group name
        name: String,
        /// Group kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Show a group's extended display name
    Longname {
        /// Group name
        name: String,
        /// Fallback when no longname is set
        #[arg(long, default_value = "")]
        default: String,
        /// Group kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// List groups allowed to become a group's parent
    AllowableParents {
        /// Group name (omit to list all groups of the kind)
        name: Option<String>,
        /// Group kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Expand a search query over an organization's descendants
    Search {
        /// Query string
        #[arg(short, long)]
        query: String,
        /// Filter query string
        #[arg(long, default_value = "")]
        fq: String,
        /// Organization the search is scoped to
        #[arg(short, long)]
        group: String,
    },

    /// Show store and settings status
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

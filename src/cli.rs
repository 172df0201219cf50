use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::select::SelectPolicy;

#[derive(Debug, Parser)]
#[command(
    name = "books",
    about = "Find and open books, papers and manuals by subject, keyword, author or title"
)]
pub struct Cli {
    /// Root of the document tree (overrides BOOKS_ROOT and the config file)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Program used to open documents (overrides BOOKS_VIEWER and the config file)
    #[arg(long, global = true)]
    pub viewer: Option<String>,

    /// Increase log verbosity (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the document matching every search term
    Open(OpenArgs),
    /// List documents matching every search term
    Search(SearchArgs),
    /// List the subject folders of the document tree
    List(ListArgs),
    /// Pick a document from a subject folder by its key
    Browse(BrowseArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Open --

#[derive(Debug, Parser)]
pub struct OpenArgs {
    /// Search terms matched against subject, keyword, authors and title
    #[arg(required = true)]
    pub terms: Vec<String>,

    /// What to do when several documents match
    #[arg(long, value_enum, default_value_t = SelectPolicy::Prompt)]
    pub select: SelectPolicy,
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search terms; with none, every document is listed
    pub terms: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Output only file paths (one per line)
    #[arg(long, conflicts_with = "json")]
    pub files: bool,
}

// -- List --

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Browse --

#[derive(Debug, Parser)]
pub struct BrowseArgs {
    /// Folder key (the part after `__`, or the whole name for folders without
    /// one); asked for when missing or unknown
    pub key: Option<String>,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "books",
            &mut std::io::stdout(),
        );
    }
}

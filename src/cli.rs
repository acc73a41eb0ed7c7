use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = crate::APP_NAME, version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable logging to 'stagehand.log'
    #[clap(long, action)]
    pub log: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the current file status
    Status,
    /// Stage files (sidecar metadata files are included automatically)
    Stage { paths: Vec<String> },
    /// Unstage files (sidecar metadata files are included automatically)
    Unstage { paths: Vec<String> },
    /// Open a non-interactive diff of files against HEAD
    Diff { paths: Vec<String> },
    /// Discard local changes to files
    Discard {
        paths: Vec<String>,

        /// Skip the confirmation prompt
        #[clap(long, action)]
        yes: bool,
    },
    /// Commit staged changes
    Commit {
        /// Commit message
        #[clap(short, long)]
        message: String,
    },
    /// Watch the project and print the status after every change
    Watch,
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "disc-intake")]
#[command(about = "Copies imaging discs into a study tree, relabelling each record", long_about = None)]
pub struct Cli {
    /// Directory whose children are mounted removable volumes
    #[arg(long, global = true)]
    pub media_root: Option<PathBuf>,

    /// Root of the destination study tree
    #[arg(long, global = true)]
    pub destination: Option<PathBuf>,

    /// Seconds between detection checks
    #[arg(long, global = true)]
    pub interval: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Watch for discs and ingest each one as it appears (default)
    Watch,
    /// Ingest a single directory as if it were a mounted disc
    Ingest(IngestArgs),
    /// Print configuration values
    PrintConfig,
    /// Print the labels that will be offered as defaults
    ShowDefaults,
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Directory to ingest
    pub source: PathBuf,

    /// Eject the source with the configured command afterwards
    #[arg(long)]
    pub eject: bool,
}

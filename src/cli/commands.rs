use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tick",
    about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - toggle markdown checkboxes"),
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Checklist file to toggle interactively
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Clone, Debug, Default)]
pub struct GlobalArgs {
    /// Output as JSON (rate, list)
    #[arg(long, global = true)]
    pub json: bool,

    /// Fail on bad due dates and unparseable front matter instead of warning
    #[arg(long, global = true)]
    pub strict: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report completion rate and overdue tasks without prompting
    Rate(FileArgs),
    /// Print every checkbox with its index and state
    List(FileArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Checklist file
    pub file: PathBuf,
}

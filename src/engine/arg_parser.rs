use clap::{CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

use crate::engine::columns::columns_help;

/// List file descriptors of running processes.
#[derive(Clone, Debug, Parser)]
#[command(name = "lsfd", version)]
#[command(about = "List open files of every running process: descriptors, cwd, exe, root and namespaces.")]
pub struct Cli {
    /// Don't print headings.
    #[arg(long, short = 'n')]
    pub noheadings: bool,

    /// Use JSON output format.
    #[arg(long, short = 'J')]
    pub json: bool,

    /// Use raw output format.
    #[arg(long, short = 'r')]
    pub raw: bool,

    /// Output columns, comma-separated. Replaces the default set; a column may repeat.
    #[arg(long, short = 'o', value_name = "LIST")]
    pub output: Option<String>,

    /// Number of collector threads. Default: available threads, at most 4.
    #[arg(long, short = 't', value_name = "N")]
    pub threads: Option<usize>,

    /// Verbose (debug) logging.
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Config file. Default: `.lsfd.toml` in $HOME, when present.
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read the process table from DIR instead of /proc.
    #[arg(long, hide = true, value_name = "DIR")]
    pub proc_root: Option<PathBuf>,
}

impl Cli {
    /// The clap command with the column list appended to `--help`.
    pub fn command_with_columns() -> clap::Command {
        Cli::command().after_help(columns_help())
    }

    /// Parse `std::env::args`, exiting on `--help`, `--version` or a usage error.
    pub fn parse_args() -> Self {
        let matches = Self::command_with_columns().get_matches();
        Self::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    /// Parse an explicit argument list (first item is the program name).
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command_with_columns().try_get_matches_from(args)?;
        Self::from_arg_matches(&matches)
    }
}

//! CLI command handler: build options, collect, render, emit.

use anyhow::{Context, Result, bail};
use log::debug;
use std::io::{self, Write};

use crate::engine::arg_parser::Cli;
use crate::engine::columns::parse_column_list;
use crate::utils::config::PackagePaths;
use crate::utils::lsfd_toml::{apply_file_to_opts, load_lsfd_toml};
use crate::utils::setup_logging;
use crate::{Opts, OutputMode};

/// Defaults, then the config file, then command-line flags. Every column name is validated here,
/// before any collection work starts.
pub fn setup_opts(cli: &Cli) -> Result<Opts> {
    let mut opts = Opts::default();

    let config_path = cli
        .config
        .clone()
        .or_else(|| PackagePaths::get().default_config_path());
    if let Some(path) = config_path {
        match load_lsfd_toml(&path)? {
            Some(file) => apply_file_to_opts(&file, &mut opts)
                .with_context(|| format!("invalid config {}", path.display()))?,
            None if cli.config.is_some() => bail!("config file {} not found", path.display()),
            None => {}
        }
    }

    if let Some(ref list) = cli.output {
        opts.columns = parse_column_list(list)?;
    }
    if let Some(n) = cli.threads {
        if n == 0 {
            bail!("--threads must be at least 1");
        }
        opts.num_threads = Some(n);
    }
    if cli.raw {
        opts.output_mode = OutputMode::Raw;
    }
    // JSON wins when both formats are requested.
    if cli.json {
        opts.output_mode = OutputMode::Json;
    }
    if cli.noheadings {
        opts.noheadings = true;
    }
    if cli.verbose {
        opts.verbose = true;
    }
    if let Some(ref root) = cli.proc_root {
        opts.proc_root = root.clone();
    }
    Ok(opts)
}

/// Run one snapshot and write the table to stdout.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let opts = setup_opts(cli)?;
    setup_logging(opts.verbose);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );

    let table = crate::lsfd(&opts)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    table
        .emit(&mut out, opts.output_mode, opts.noheadings)
        .context("failed to write output")?;
    out.flush().context("failed to write output")?;
    Ok(())
}

//! lsfd CLI: list open files of running processes.

use anyhow::Result;
use lsfd::engine::Cli;
use lsfd::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse_args();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}

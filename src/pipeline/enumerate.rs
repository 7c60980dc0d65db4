//! Build the static list of process stubs from the process table.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

use crate::ProcessStub;

/// Numeric entries of `proc_root`, ascending by pid. An unreadable root is fatal.
pub fn collect_process_stubs(proc_root: &Path) -> Result<Vec<ProcessStub>> {
    let entries = fs::read_dir(proc_root)
        .with_context(|| format!("failed to open {}", proc_root.display()))?;
    let mut stubs: Vec<ProcessStub> = entries
        .flatten()
        .filter_map(|entry| parse_pid(entry.file_name().to_str()?))
        .map(|pid| ProcessStub { pid })
        .collect();
    stubs.sort_unstable_by_key(|s| s.pid);
    stubs.dedup();
    debug!("enumerated {} processes under {}", stubs.len(), proc_root.display());
    Ok(stubs)
}

/// Pid from a directory name. No task has pid 0, so it is rejected with the non-numeric names.
fn parse_pid(name: &str) -> Option<u32> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    name.parse().ok().filter(|&pid| pid != 0)
}

//! Per-process enrichment: command name, fixed associations, namespace handles, descriptors.
//!
//! Only a missing command name is fatal. Anything that vanishes or is not readable while a process
//! is being scanned is skipped on its own, without affecting the rest of the process.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use crate::Process;
use crate::file::{Association, File, NamespaceKind, StatSnapshot, resolve};

use super::context::CollectContext;

/// Enrich one process. Files are appended in discovery order.
pub fn enrich(ctx: &CollectContext, pid: u32) -> Result<Process> {
    let proc_dir = ctx.proc_dir(pid);
    let command = read_command_name(&proc_dir)
        .with_context(|| format!("failed to get command name of process {pid}"))?;
    let uid = fs::metadata(&proc_dir).ok().map(|m| m.uid());
    let mut process = Process::new(pid, command, uid);

    collect_out_of_box_files(&mut process, &proc_dir, &Association::FIXED);
    let namespaces: Vec<Association> = NamespaceKind::ALL
        .into_iter()
        .map(Association::Namespace)
        .collect();
    collect_out_of_box_files(&mut process, &proc_dir.join("ns"), &namespaces);
    collect_fd_files(&mut process, &proc_dir.join("fd"));

    debug!(
        "process {} ({}): {} files",
        pid,
        process.command,
        process.files.len()
    );
    Ok(process)
}

/// `<proc_dir>/comm` without its trailing newline.
pub fn read_command_name(proc_dir: &Path) -> Result<String> {
    let path = proc_dir.join("comm");
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    Ok(raw.trim_end_matches('\n').to_string())
}

/// Stat (following the link) and read the link target. `None` when either fails.
fn collect_file(path: &Path, association: Association) -> Option<File> {
    let meta = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) => {
            debug!("skip {}: stat: {}", path.display(), e);
            return None;
        }
    };
    let target = match fs::read_link(path) {
        Ok(t) => t,
        Err(e) => {
            debug!("skip {}: readlink: {}", path.display(), e);
            return None;
        }
    };
    Some(resolve(StatSnapshot::from_metadata(&meta), target, association))
}

/// Named associations inside `dir` (e.g. `cwd` under `/proc/<pid>`, `net` under `/proc/<pid>/ns`).
fn collect_out_of_box_files(process: &mut Process, dir: &Path, associations: &[Association]) {
    for &association in associations {
        let Some(name) = association.entry_name() else {
            continue;
        };
        if let Some(file) = collect_file(&dir.join(name), association) {
            process.files.push(file);
        }
    }
}

/// Every numeric entry of the descriptor directory, ascending. An unreadable directory leaves the
/// process with what it already has.
fn collect_fd_files(process: &mut Process, fd_dir: &Path) {
    let entries = match fs::read_dir(fd_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("process {}: no descriptors: {}: {}", process.pid, fd_dir.display(), e);
            return;
        }
    };
    let mut fds: Vec<(u32, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let fd = entry.file_name().to_str()?.parse::<u32>().ok()?;
            Some((fd, entry.path()))
        })
        .collect();
    fds.sort_unstable_by_key(|(fd, _)| *fd);

    for (fd, path) in fds {
        if let Some(file) = collect_file(&path, Association::Fd(fd)) {
            process.files.push(file);
        }
    }
}

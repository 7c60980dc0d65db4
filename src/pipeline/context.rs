//! Collection context and tuning: shared, read-only data handed to every collector thread.

use std::path::{Path, PathBuf};

use crate::Opts;
use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::determine_threads_given_fd_limit;

/// Pool size derived from options, available threads and the FD limit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    pub num_threads: usize,
}

impl PipelineTuning {
    /// Requested size when given, else the default collector count; then capped by the FD limit.
    /// Never more collectors than there are processes to claim, never fewer than one.
    pub fn for_run(requested: Option<usize>, process_count: usize) -> Self {
        let wanted =
            requested.unwrap_or_else(|| WorkerThreadLimits::current().default_collectors());
        let num_threads = determine_threads_given_fd_limit(wanted)
            .min(process_count.max(1))
            .max(1);
        Self { num_threads }
    }
}

/// Where to read the process table from. Cloned into each collector.
#[derive(Clone, Debug)]
pub struct CollectContext {
    pub proc_root: PathBuf,
}

impl CollectContext {
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// `<proc_root>/<pid>`.
    pub fn proc_dir(&self, pid: u32) -> PathBuf {
        self.proc_root.join(pid.to_string())
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }
}

impl From<&Opts> for CollectContext {
    fn from(opts: &Opts) -> Self {
        CollectContext::new(opts.proc_root.clone())
    }
}

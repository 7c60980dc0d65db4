//! Public and internal types for the lsfd API and pipeline.

use std::path::PathBuf;

use crate::engine::columns::ColumnId;
use crate::file::File;
use crate::utils::config::{DEFAULT_COLUMNS, PROC_ROOT};

/// A process found while enumerating the process table, before enrichment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessStub {
    pub pid: u32,
}

/// One enriched process and the files it holds open.
///
/// `files` is in discovery order: fixed associations, then namespace handles, then descriptors.
#[derive(Debug)]
pub struct Process {
    pub pid: u32,
    /// Contents of `/proc/<pid>/comm`.
    pub command: String,
    /// Owner of `/proc/<pid>`; `None` when the entry vanished before it could be read.
    pub uid: Option<u32>,
    pub files: Vec<File>,
}

impl Process {
    pub fn new(pid: u32, command: String, uid: Option<u32>) -> Self {
        Self {
            pid,
            command,
            uid,
            files: Vec::new(),
        }
    }

    /// Release every file through its kind chain, then drop the process.
    /// Returns the number of release hooks invoked.
    pub fn release(mut self) -> usize {
        self.files.iter_mut().map(File::release).sum()
    }
}

/// Everything gathered in one run. Never updated after collection.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub processes: Vec<Process>,
}

impl Snapshot {
    pub fn file_count(&self) -> usize {
        self.processes.iter().map(|p| p.files.len()).sum()
    }

    /// Final cleanup pass: release every file of every process. Returns hooks invoked.
    pub fn release(self) -> usize {
        self.processes.into_iter().map(Process::release).sum()
    }
}

/// How the render sink formats the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned columns.
    #[default]
    Human,
    /// Space separated, unpadded, whitespace escaped.
    Raw,
    Json,
}

/// Full options (CLI and lib).
#[derive(Clone, Debug)]
pub struct Opts {
    /// Selected columns, in output order. Duplicates are kept.
    pub columns: Vec<ColumnId>,
    pub output_mode: OutputMode,
    /// Omit the header line (human and raw output).
    pub noheadings: bool,
    /// Collector pool size. When None, derived from available threads and the FD limit.
    pub num_threads: Option<usize>,
    /// Mount point of the process table.
    pub proc_root: PathBuf,
    /// Debug logging.
    pub verbose: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS.to_vec(),
            output_mode: OutputMode::Human,
            noheadings: false,
            num_threads: None,
            proc_root: PathBuf::from(PROC_ROOT),
            verbose: false,
        }
    }
}

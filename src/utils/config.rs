//! Application configuration constants.
//! Tuning and defaults in one place.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::engine::columns::ColumnId;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    /// Name used as the top-level key of JSON output.
    pub fn table_name(&self) -> &str {
        self.pkg_name
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// `$HOME/.lsfd.toml`, or `None` when `HOME` is unset.
    pub fn default_config_path(&self) -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(self.config_filename()))
    }
}

// ---- procfs ----

/// Default mount point of the process table.
pub const PROC_ROOT: &str = "/proc";

// ---- Worker threads ----

/// Thread limits for the collector pool.
/// Use [`WorkerThreadLimits::current()`] to fill `all_threads` from rayon; the rest are const.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Max collectors when the user did not ask for a pool size.
    pub default_max: usize,
    /// Minimum pool size.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            default_max: Self::DEFAULT_MAX_COLLECTORS,
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const DEFAULT_MAX_COLLECTORS: usize = 4;
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }

    /// Pool size used when none was requested.
    pub fn default_collectors(&self) -> usize {
        self.all_threads.clamp(self.floor, self.default_max.max(self.floor))
    }
}

// ---- Columns ----

/// Columns shown when `--output` is not given.
pub const DEFAULT_COLUMNS: [ColumnId; 8] = [
    ColumnId::Command,
    ColumnId::ProcessId,
    ColumnId::User,
    ColumnId::Association,
    ColumnId::Type,
    ColumnId::Device,
    ColumnId::Inode,
    ColumnId::Name,
];

//! lsfd: list the files every running process holds open.
//!
//! One run is one snapshot: enumerate the process table, enrich each process on a small collector
//! pool, classify every file by kind, then render the selected columns.

pub mod engine;
pub mod file;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::{ColumnId, RenderContext, Table};
pub use file::{Association, File, FileKind, NamespaceKind, StatSnapshot};

use log::debug;

/// Result alias used by public lsfd API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Collect a snapshot with `opts`.
pub fn collect(opts: &Opts) -> Result<Snapshot> {
    pipeline::collect_snapshot(opts)
}

/// Render every file of `snapshot` under `columns`.
pub fn render(snapshot: &Snapshot, columns: &[ColumnId], ctx: &mut RenderContext) -> Table {
    engine::convert(snapshot, columns, ctx)
}

/// Single entry point: collect, render with a fresh lookup context, then release the snapshot.
pub fn lsfd(opts: &Opts) -> Result<Table> {
    let snapshot = collect(opts)?;
    debug!(
        "snapshot: {} processes, {} files",
        snapshot.processes.len(),
        snapshot.file_count()
    );
    let mut ctx = RenderContext::new();
    let table = render(&snapshot, &opts.columns, &mut ctx);
    let released = snapshot.release();
    debug!("released {} kind-specific resources", released);
    Ok(table)
}

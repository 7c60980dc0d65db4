//! Column dispatch: turn (process, file, column) into a cell by walking the file's kind chain.

use crate::engine::columns::ColumnId;
use crate::engine::output::Table;
use crate::file::File;
use crate::utils::UserCache;
use crate::{Process, Snapshot};

/// Lookup state for one rendering pass. Build one per run.
#[derive(Debug, Default)]
pub struct RenderContext {
    pub users: UserCache,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Cell for `column`, from the most specific kind that answers it.
pub fn render_cell(
    process: &Process,
    file: &File,
    column: ColumnId,
    ctx: &mut RenderContext,
) -> String {
    for kind in file.kind.chain() {
        if let Some(fill) = kind.ops().fill_column
            && let Some(cell) = fill(process, file, column, ctx)
        {
            return cell;
        }
    }
    // The chain ends at the generic kind, which answers every column.
    String::new()
}

/// One row: a cell per selected column, in selection order.
pub fn render_row(
    process: &Process,
    file: &File,
    columns: &[ColumnId],
    ctx: &mut RenderContext,
) -> Vec<String> {
    columns
        .iter()
        .map(|&column| render_cell(process, file, column, ctx))
        .collect()
}

/// Build the output table for every file of every process.
pub fn convert(snapshot: &Snapshot, columns: &[ColumnId], ctx: &mut RenderContext) -> Table {
    let mut table = Table::new(columns.to_vec());
    for process in &snapshot.processes {
        for file in &process.files {
            table.add_row(render_row(process, file, columns, ctx));
        }
    }
    table
}

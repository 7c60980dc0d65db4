//! Engine: command line, column registry, dispatch and output.

pub mod arg_parser;
pub mod cli;
pub mod columns;
pub mod dispatch;
pub mod output;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::{handle_run, setup_opts};
pub use columns::{ColumnId, ColumnInfo, JsonType, columns_help, parse_column_list};
pub use dispatch::{RenderContext, convert, render_cell, render_row};
pub use output::{Table, escape_human, escape_raw};

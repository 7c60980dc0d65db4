//! Render sink: holds the selected columns and rows of cells, and writes them as an aligned table,
//! raw text, or JSON.

use prettytable::format::FormatBuilder;
use prettytable::{Cell, Row};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::io::{self, Write};

use crate::OutputMode;
use crate::engine::columns::{ColumnId, JsonType};
use crate::utils::config::PackagePaths;

/// Rows of formatted cells under an ordered column list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Table {
    columns: Vec<ColumnId>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<ColumnId>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(cells);
    }

    pub fn columns(&self) -> &[ColumnId] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn emit<W: Write>(&self, out: &mut W, mode: OutputMode, noheadings: bool) -> io::Result<()> {
        match mode {
            OutputMode::Human => self.emit_human(out, noheadings),
            OutputMode::Raw => self.emit_raw(out, noheadings),
            OutputMode::Json => self.emit_json(out),
        }
    }

    /// [`Table::emit`] into a string.
    pub fn render(&self, mode: OutputMode, noheadings: bool) -> io::Result<String> {
        let mut buf = Vec::new();
        self.emit(&mut buf, mode, noheadings)?;
        String::from_utf8(buf).map_err(io::Error::other)
    }

    fn aligned_row(&self, cells: impl Iterator<Item = String>) -> Row {
        Row::new(
            self.columns
                .iter()
                .zip(cells)
                .map(|(column, text)| {
                    let cell = Cell::new(&text);
                    if column.info().right {
                        cell.style_spec("r")
                    } else {
                        cell
                    }
                })
                .collect(),
        )
    }

    fn emit_human<W: Write>(&self, out: &mut W, noheadings: bool) -> io::Result<()> {
        let mut grid = prettytable::Table::new();
        grid.set_format(FormatBuilder::new().column_separator(' ').padding(0, 0).build());
        if !noheadings {
            grid.set_titles(self.aligned_row(self.columns.iter().map(|c| c.name().to_string())));
        }
        for row in &self.rows {
            grid.add_row(self.aligned_row(row.iter().map(|cell| escape_human(cell))));
        }
        // The last column is padded too.
        for line in grid.to_string().lines() {
            writeln!(out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    fn emit_raw<W: Write>(&self, out: &mut W, noheadings: bool) -> io::Result<()> {
        if !noheadings {
            let headers: Vec<&str> = self.columns.iter().map(|c| c.name()).collect();
            writeln!(out, "{}", headers.join(" "))?;
        }
        for row in &self.rows {
            let cells: Vec<String> = row.iter().map(|c| escape_raw(c)).collect();
            writeln!(out, "{}", cells.join(" "))?;
        }
        Ok(())
    }

    fn emit_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// `{"lsfd": [row, ...]}`.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let rows: Vec<JsonRow<'_>> = self
            .rows
            .iter()
            .map(|cells| JsonRow {
                columns: &self.columns,
                cells,
            })
            .collect();
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(PackagePaths::get().table_name(), &rows)?;
        map.end()
    }
}

/// One output row as a JSON object. A column selected twice yields its key twice.
struct JsonRow<'a> {
    columns: &'a [ColumnId],
    cells: &'a [String],
}

impl Serialize for JsonRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(&column.name().to_lowercase(), &json_value(*column, cell))?;
        }
        map.end()
    }
}

/// Number columns become JSON numbers (`null` when empty); everything else stays a string.
fn json_value(column: ColumnId, cell: &str) -> Value {
    match column.info().json_type {
        JsonType::Number if cell.is_empty() => Value::Null,
        JsonType::Number => cell
            .parse::<u64>()
            .map(Value::from)
            .or_else(|_| cell.parse::<i64>().map(Value::from))
            .unwrap_or_else(|_| Value::from(cell)),
        JsonType::String => Value::from(cell),
    }
}

fn hex_escape(cell: &str, escape: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(cell.len());
    for c in cell.chars() {
        if escape(c) {
            let mut bytes = [0u8; 4];
            for b in c.encode_utf8(&mut bytes).bytes() {
                out.push_str(&format!("\\x{b:02x}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Hex-escape control characters so one cell never spans more than one line.
pub fn escape_human(cell: &str) -> String {
    hex_escape(cell, char::is_control)
}

/// Hex-escape whitespace and control characters so raw cells stay one token each.
pub fn escape_raw(cell: &str) -> String {
    hex_escape(cell, |c| c.is_whitespace() || c.is_control())
}

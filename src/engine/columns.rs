//! Column registry: names, alignment and help text for every output column.

use anyhow::{Result, bail};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Association,
    Command,
    Device,
    FileDescriptor,
    Inode,
    Name,
    ProcessId,
    Type,
    UserId,
    User,
}

/// How a column's cells are typed in JSON output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonType {
    String,
    Number,
}

/// Immutable description of one column.
#[derive(Debug)]
pub struct ColumnInfo {
    pub name: &'static str,
    /// Older short name accepted by `--output`.
    pub alias: Option<&'static str>,
    pub right: bool,
    pub json_type: JsonType,
    pub help: &'static str,
}

static INFOS: [ColumnInfo; 10] = [
    ColumnInfo {
        name: "ASSOCIATION",
        alias: Some("ASSOC"),
        right: true,
        json_type: JsonType::String,
        help: "association between file and process",
    },
    ColumnInfo {
        name: "COMMAND",
        alias: None,
        right: false,
        json_type: JsonType::String,
        help: "command of the process opening the file",
    },
    ColumnInfo {
        name: "DEVICE",
        alias: None,
        right: true,
        json_type: JsonType::String,
        help: "device major and minor number",
    },
    ColumnInfo {
        name: "FILE-DESCRIPTOR",
        alias: Some("FD"),
        right: true,
        json_type: JsonType::Number,
        help: "file descriptor for the file",
    },
    ColumnInfo {
        name: "INODE",
        alias: None,
        right: true,
        json_type: JsonType::Number,
        help: "inode number",
    },
    ColumnInfo {
        name: "NAME",
        alias: None,
        right: false,
        json_type: JsonType::String,
        help: "name of the file",
    },
    ColumnInfo {
        name: "PROCESS-ID",
        alias: Some("PID"),
        right: true,
        json_type: JsonType::Number,
        help: "PID of the process opening the file",
    },
    ColumnInfo {
        name: "TYPE",
        alias: None,
        right: true,
        json_type: JsonType::String,
        help: "file type",
    },
    ColumnInfo {
        name: "USER-ID",
        alias: Some("UID"),
        right: true,
        json_type: JsonType::Number,
        help: "user ID number",
    },
    ColumnInfo {
        name: "USER",
        alias: None,
        right: true,
        json_type: JsonType::String,
        help: "user of the process",
    },
];

impl ColumnId {
    /// Registry order (also the order shown in `--help`).
    pub const ALL: [ColumnId; 10] = [
        ColumnId::Association,
        ColumnId::Command,
        ColumnId::Device,
        ColumnId::FileDescriptor,
        ColumnId::Inode,
        ColumnId::Name,
        ColumnId::ProcessId,
        ColumnId::Type,
        ColumnId::UserId,
        ColumnId::User,
    ];

    pub fn info(self) -> &'static ColumnInfo {
        &INFOS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Case-insensitive exact match against the name or alias.
    pub fn from_name(name: &str) -> Option<ColumnId> {
        ColumnId::ALL.into_iter().find(|id| {
            let info = id.info();
            info.name.eq_ignore_ascii_case(name)
                || info.alias.is_some_and(|a| a.eq_ignore_ascii_case(name))
        })
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse a comma-separated `--output` list. Order and duplicates are kept; any unknown
/// (or empty) name rejects the whole list.
pub fn parse_column_list(list: &str) -> Result<Vec<ColumnId>> {
    let mut columns = Vec::new();
    for name in list.split(',') {
        match ColumnId::from_name(name) {
            Some(id) => columns.push(id),
            None => bail!("unknown column: {}", name),
        }
    }
    Ok(columns)
}

/// The "Available output columns" block appended to `--help`.
pub fn columns_help() -> String {
    let mut out = String::from("Available output columns:\n");
    for id in ColumnId::ALL {
        let info = id.info();
        out.push_str(&format!(" {:>15}  {}\n", info.name, info.help));
    }
    out
}

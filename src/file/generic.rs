//! Fallback kind: answers every column from the stat snapshot and the owning process.

use super::{File, KindOps, device_label};
use crate::Process;
use crate::engine::columns::ColumnId;
use crate::engine::dispatch::RenderContext;

pub(super) static OPS: KindOps = KindOps {
    name: "generic",
    fallback: None,
    initialize: None,
    fill_column: Some(fill_column),
    release: None,
};

fn fill_column(
    process: &Process,
    file: &File,
    column: ColumnId,
    ctx: &mut RenderContext,
) -> Option<String> {
    let cell = match column {
        ColumnId::Association => file.association.to_string(),
        ColumnId::Command => process.command.clone(),
        ColumnId::Device => device_label(file.stat.dev),
        ColumnId::FileDescriptor => file.fd().map(|fd| fd.to_string()).unwrap_or_default(),
        ColumnId::Inode => file.stat.ino.to_string(),
        ColumnId::Name => file.display_name(),
        ColumnId::ProcessId => process.pid.to_string(),
        ColumnId::Type => file.stat.type_name().to_string(),
        ColumnId::UserId => process.uid.map(|uid| uid.to_string()).unwrap_or_default(),
        ColumnId::User => process
            .uid
            .map(|uid| ctx.users.name_of(uid).to_string())
            .unwrap_or_default(),
    };
    Some(cell)
}

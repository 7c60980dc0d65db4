//! Character devices: TYPE is `CHR`, DEVICE is the represented device rather than the containing one.

use super::{File, FileKind, KindOps, device_label};
use crate::Process;
use crate::engine::columns::ColumnId;
use crate::engine::dispatch::RenderContext;

pub(super) static OPS: KindOps = KindOps {
    name: "character device",
    fallback: Some(FileKind::Generic),
    initialize: Some(initialize),
    fill_column: Some(fill_column),
    release: Some(release),
};

/// Cache the `major:minor` label of the device this file stands for.
pub(super) fn initialize(file: &mut File) {
    file.aux = Some(device_label(file.stat.rdev));
}

pub(super) fn release(file: &mut File) -> bool {
    file.aux.take().is_some()
}

/// DEVICE cell shared with block devices.
pub(super) fn represented_device(file: &File) -> String {
    file.aux
        .clone()
        .unwrap_or_else(|| device_label(file.stat.rdev))
}

fn fill_column(_: &Process, file: &File, column: ColumnId, _: &mut RenderContext) -> Option<String> {
    match column {
        ColumnId::Type => Some("CHR".to_string()),
        ColumnId::Device => Some(represented_device(file)),
        _ => None,
    }
}

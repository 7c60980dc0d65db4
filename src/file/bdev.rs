use super::cdev::{initialize, release, represented_device};
use super::{File, FileKind, KindOps};
use crate::Process;
use crate::engine::columns::ColumnId;
use crate::engine::dispatch::RenderContext;

pub(super) static OPS: KindOps = KindOps {
    name: "block device",
    fallback: Some(FileKind::Generic),
    initialize: Some(initialize),
    fill_column: Some(fill_column),
    release: Some(release),
};

fn fill_column(_: &Process, file: &File, column: ColumnId, _: &mut RenderContext) -> Option<String> {
    match column {
        ColumnId::Type => Some("BLK".to_string()),
        ColumnId::Device => Some(represented_device(file)),
        _ => None,
    }
}

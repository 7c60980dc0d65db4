use super::{File, FileKind, KindOps};
use crate::Process;
use crate::engine::columns::ColumnId;
use crate::engine::dispatch::RenderContext;

pub(super) static OPS: KindOps = KindOps {
    name: "regular",
    fallback: Some(FileKind::Generic),
    initialize: None,
    fill_column: Some(fill_column),
    release: None,
};

fn fill_column(_: &Process, _: &File, column: ColumnId, _: &mut RenderContext) -> Option<String> {
    match column {
        ColumnId::Type => Some("REG".to_string()),
        _ => None,
    }
}

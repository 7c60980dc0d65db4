//! File records, their associations, and the kind registry used for dispatch.
//!
//! Every [`File`] carries a [`FileKind`]. Each kind has a [`KindOps`] table naming the capabilities
//! it overrides and the kind to fall back to when it declines one. Chains are short and always end
//! at [`FileKind::Generic`], which answers every column.

mod bdev;
mod cdev;
mod generic;
mod regular;

use std::fmt;
use std::fs::Metadata;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::PathBuf;

use crate::Process;
use crate::engine::columns::ColumnId;
use crate::engine::dispatch::RenderContext;

// ---- Associations ----

/// Namespace handles found under `/proc/<pid>/ns/`, in scan order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    Cgroup,
    Ipc,
    Mnt,
    Net,
    Pid,
    PidForChildren,
    Time,
    TimeForChildren,
    User,
    Uts,
}

impl NamespaceKind {
    pub const ALL: [NamespaceKind; 10] = [
        NamespaceKind::Cgroup,
        NamespaceKind::Ipc,
        NamespaceKind::Mnt,
        NamespaceKind::Net,
        NamespaceKind::Pid,
        NamespaceKind::PidForChildren,
        NamespaceKind::Time,
        NamespaceKind::TimeForChildren,
        NamespaceKind::User,
        NamespaceKind::Uts,
    ];

    /// Entry name under `/proc/<pid>/ns/`.
    pub fn entry_name(self) -> &'static str {
        match self {
            NamespaceKind::Cgroup => "cgroup",
            NamespaceKind::Ipc => "ipc",
            NamespaceKind::Mnt => "mnt",
            NamespaceKind::Net => "net",
            NamespaceKind::Pid => "pid",
            NamespaceKind::PidForChildren => "pid_for_children",
            NamespaceKind::Time => "time",
            NamespaceKind::TimeForChildren => "time_for_children",
            NamespaceKind::User => "user",
            NamespaceKind::Uts => "uts",
        }
    }

    /// Short form shown in the ASSOCIATION column.
    pub fn label(self) -> &'static str {
        match self {
            NamespaceKind::PidForChildren => "pid4c",
            NamespaceKind::TimeForChildren => "time4c",
            other => other.entry_name(),
        }
    }
}

/// How a file relates to its process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Association {
    /// Numbered descriptor from `/proc/<pid>/fd/`.
    Fd(u32),
    Cwd,
    Exe,
    Root,
    Namespace(NamespaceKind),
}

impl Association {
    /// Fixed associations read directly under `/proc/<pid>/`, in scan order.
    pub const FIXED: [Association; 3] = [Association::Cwd, Association::Exe, Association::Root];

    /// Descriptor number, or the negative sentinel for fixed associations
    /// (cwd -1, exe -2, root -3, namespaces -4 through -13).
    pub fn raw(self) -> i64 {
        match self {
            Association::Fd(fd) => i64::from(fd),
            Association::Cwd => -1,
            Association::Exe => -2,
            Association::Root => -3,
            Association::Namespace(ns) => -4 - ns as i64,
        }
    }

    pub fn fd(self) -> Option<u32> {
        match self {
            Association::Fd(fd) => Some(fd),
            _ => None,
        }
    }

    /// Entry name of a non-descriptor association inside its procfs directory.
    pub fn entry_name(self) -> Option<&'static str> {
        match self {
            Association::Fd(_) => None,
            Association::Cwd => Some("cwd"),
            Association::Exe => Some("exe"),
            Association::Root => Some("root"),
            Association::Namespace(ns) => Some(ns.entry_name()),
        }
    }
}

impl fmt::Display for Association {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Association::Fd(fd) => write!(f, "{fd}"),
            Association::Cwd => f.write_str("cwd"),
            Association::Exe => f.write_str("exe"),
            // "root" is also a user name; keep the two apart in the table.
            Association::Root => f.write_str("rtd"),
            Association::Namespace(ns) => f.write_str(ns.label()),
        }
    }
}

// ---- Stat snapshot ----

/// The stat fields kept for rendering. Taken once at collection; never refreshed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StatSnapshot {
    /// Device containing the file.
    pub dev: u64,
    pub ino: u64,
    pub mode: u32,
    pub size: u64,
    /// Device represented by the file (character and block devices only).
    pub rdev: u64,
}

impl StatSnapshot {
    pub fn from_metadata(meta: &Metadata) -> Self {
        Self {
            dev: meta.dev(),
            ino: meta.ino(),
            mode: meta.mode(),
            size: meta.size(),
            rdev: meta.rdev(),
        }
    }

    pub fn file_type_bits(&self) -> u32 {
        self.mode & libc::S_IFMT
    }

    /// Short file type name derived from the mode bits.
    pub fn type_name(&self) -> &'static str {
        match self.file_type_bits() {
            libc::S_IFREG => "REG",
            libc::S_IFCHR => "CHR",
            libc::S_IFBLK => "BLK",
            libc::S_IFDIR => "DIR",
            libc::S_IFIFO => "FIFO",
            libc::S_IFSOCK => "SOCK",
            libc::S_IFLNK => "LINK",
            _ => "UNKN",
        }
    }
}

/// Major number of a Linux `dev_t`.
pub fn dev_major(dev: u64) -> u32 {
    (((dev >> 32) & 0xffff_f000) | ((dev >> 8) & 0x0000_0fff)) as u32
}

/// Minor number of a Linux `dev_t`.
pub fn dev_minor(dev: u64) -> u32 {
    (((dev >> 12) & 0xffff_ff00) | (dev & 0x0000_00ff)) as u32
}

/// `major:minor`.
pub fn device_label(dev: u64) -> String {
    format!("{}:{}", dev_major(dev), dev_minor(dev))
}

/// Valid UTF-8 runs are copied; every other byte becomes `\xNN`.
pub fn escape_invalid_utf8(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for b in chunk.invalid() {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out
}

// ---- Kinds ----

pub type InitializeFn = fn(&mut File);
pub type FillColumnFn = fn(&Process, &File, ColumnId, &mut RenderContext) -> Option<String>;
pub type ReleaseFn = fn(&mut File) -> bool;

/// Capabilities a kind overrides, plus the kind consulted when it declines.
pub struct KindOps {
    pub name: &'static str,
    pub fallback: Option<FileKind>,
    /// Acquire kind-specific resources after the record is built.
    pub initialize: Option<InitializeFn>,
    /// Produce a cell, or `None` to defer to the fallback.
    pub fill_column: Option<FillColumnFn>,
    /// Free what `initialize` acquired. Returns true when something was freed.
    pub release: Option<ReleaseFn>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    Regular,
    CharDevice,
    BlockDevice,
    Generic,
}

impl FileKind {
    pub const ALL: [FileKind; 4] = [
        FileKind::Regular,
        FileKind::CharDevice,
        FileKind::BlockDevice,
        FileKind::Generic,
    ];

    pub fn ops(self) -> &'static KindOps {
        match self {
            FileKind::Regular => &regular::OPS,
            FileKind::CharDevice => &cdev::OPS,
            FileKind::BlockDevice => &bdev::OPS,
            FileKind::Generic => &generic::OPS,
        }
    }

    pub fn name(self) -> &'static str {
        self.ops().name
    }

    pub fn fallback(self) -> Option<FileKind> {
        self.ops().fallback
    }

    /// This kind followed by each fallback, ending at [`FileKind::Generic`].
    pub fn chain(self) -> impl Iterator<Item = FileKind> {
        std::iter::successors(Some(self), |k| k.fallback()).take(FileKind::ALL.len())
    }
}

/// Pick the most specific kind for a stat result. Anything unrecognized is generic.
pub fn classify(stat: &StatSnapshot) -> FileKind {
    match stat.file_type_bits() {
        libc::S_IFREG => FileKind::Regular,
        libc::S_IFCHR => FileKind::CharDevice,
        libc::S_IFBLK => FileKind::BlockDevice,
        _ => FileKind::Generic,
    }
}

// ---- File ----

/// One open file (or fixed association) of a process.
#[derive(Clone, Debug)]
pub struct File {
    pub association: Association,
    /// Link target as read from procfs (may be a pseudo path such as `socket:[1234]`).
    pub name: PathBuf,
    pub stat: StatSnapshot,
    pub kind: FileKind,
    /// Kind-specific cached value, owned until [`File::release`].
    aux: Option<String>,
}

impl File {
    pub fn fd(&self) -> Option<u32> {
        self.association.fd()
    }

    /// Link target as text. Bytes that are not UTF-8 are kept as `\xNN`.
    pub fn display_name(&self) -> String {
        escape_invalid_utf8(self.name.as_os_str().as_bytes())
    }

    pub fn aux(&self) -> Option<&str> {
        self.aux.as_deref()
    }

    /// Walk the kind chain from the concrete kind to generic, running each release hook once.
    /// Returns the number of hooks that freed something.
    pub fn release(&mut self) -> usize {
        let mut freed = 0;
        for kind in self.kind.chain() {
            if let Some(release) = kind.ops().release
                && release(self)
            {
                freed += 1;
            }
        }
        freed
    }
}

/// Build a [`File`] tagged with its kind and let the kind acquire its resources.
pub fn resolve(stat: StatSnapshot, name: PathBuf, association: Association) -> File {
    let kind = classify(&stat);
    let mut file = File {
        association,
        name,
        stat,
        kind,
        aux: None,
    };
    let chain: Vec<FileKind> = kind.chain().collect();
    for k in chain.iter().rev() {
        if let Some(initialize) = k.ops().initialize {
            initialize(&mut file);
        }
    }
    file
}

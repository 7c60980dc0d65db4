//! Synthetic process tables for tests: `<root>/<pid>/comm`, link entries, and their targets.
#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::symlink;
use std::path::{Path, PathBuf};

use lsfd::file::{Association, File, StatSnapshot, resolve};

pub const S_IFREG: u32 = 0o100000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFIFO: u32 = 0o010000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;

/// glibc `makedev`.
pub fn makedev(major: u64, minor: u64) -> u64 {
    ((major & 0x0000_0fff) << 8)
        | ((major & 0xffff_f000) << 32)
        | (minor & 0x0000_00ff)
        | ((minor & 0xffff_ff00) << 12)
}

pub fn synthetic_file(mode: u32, association: Association) -> File {
    let stat = StatSnapshot {
        dev: makedev(8, 1),
        ino: 4242,
        mode,
        size: 10,
        rdev: makedev(1, 3),
    };
    resolve(stat, PathBuf::from("/synthetic"), association)
}

/// A fake `/proc` plus a scratch directory for link targets.
pub struct FakeProc {
    root: tempfile::TempDir,
    targets: tempfile::TempDir,
}

impl FakeProc {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
            targets: tempfile::tempdir().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn targets(&self) -> &Path {
        self.targets.path()
    }

    /// `<root>/<pid>/` with a `comm` file.
    pub fn add_process(&self, pid: u32, comm: &str) -> PathBuf {
        let dir = self.root().join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("comm"), format!("{comm}\n")).unwrap();
        dir
    }

    /// `<root>/<pid>/` without `comm`.
    pub fn add_broken_process(&self, pid: u32) -> PathBuf {
        let dir = self.root().join(pid.to_string());
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Symlink `<root>/<pid>/<rel>` → `target`, creating parent directories.
    pub fn link(&self, pid: u32, rel: &str, target: &Path) {
        let path = self.root().join(pid.to_string()).join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        symlink(target, path).unwrap();
    }

    /// A regular file in the target directory.
    pub fn regular_file(&self, name: &str) -> PathBuf {
        let path = self.targets().join(name);
        fs::write(&path, b"data").unwrap();
        path
    }

    /// A typical process: cwd and root are directories, exe a regular file, fds 0-2 on /dev/null,
    /// fd 3 on a regular file.
    pub fn add_typical_process(&self, pid: u32, comm: &str) {
        self.add_process(pid, comm);
        self.link(pid, "cwd", self.targets());
        self.link(pid, "exe", &self.regular_file(&format!("{comm}-bin")));
        self.link(pid, "root", Path::new("/"));
        for fd in 0..3 {
            self.link(pid, &format!("fd/{fd}"), Path::new("/dev/null"));
        }
        self.link(pid, "fd/3", &self.regular_file(&format!("{comm}.log")));
    }
}

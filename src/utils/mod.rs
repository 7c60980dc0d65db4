pub mod config;
pub mod fd_limit;
pub mod idcache;
pub mod logger;
pub(crate) mod lsfd_toml;

pub use config::*;
pub use fd_limit::{
    FDS_PER_WORKER, determine_threads_given_fd_limit, max_open_fds, max_workers_by_fd_limit,
};
pub use idcache::UserCache;
pub use logger::setup_logging;

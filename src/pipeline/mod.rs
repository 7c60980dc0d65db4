//! Collection pipeline: enumerate, schedule, enrich.

pub mod context;
pub mod enrich;
pub mod enumerate;
pub mod error_handler;
pub mod orchestrator;
pub mod scheduler;

pub use context::{CollectContext, PipelineTuning};
pub use enrich::{enrich, read_command_name};
pub use enumerate::collect_process_stubs;
pub use error_handler::FirstError;
pub use orchestrator::{
    Collected, collect_snapshot, join_collectors, run_collectors, spawn_collectors,
};
pub use scheduler::{Claim, QueueState, WorkQueue};

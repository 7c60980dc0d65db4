use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Sender, unbounded};
use log::debug;
use std::thread::{self, JoinHandle};

use crate::{Opts, Process, ProcessStub, Snapshot};

use super::context::{CollectContext, PipelineTuning};
use super::enrich::enrich;
use super::enumerate::collect_process_stubs;
use super::error_handler::FirstError;
use super::scheduler::WorkQueue;

/// An enriched process and its position in the enumeration order.
pub type Collected = (usize, Process);

/// Single collector: claim, enrich, send, until the queue is drained or some collector failed.
/// Returns how many processes this collector claimed.
fn collector_loop(
    worker: usize,
    queue: WorkQueue,
    result_tx: Sender<Collected>,
    ctx: CollectContext,
    first_error: FirstError,
) -> Result<usize> {
    let mut claimed = 0_usize;
    while !first_error.is_set() {
        let Some(claim) = queue.claim() else {
            break;
        };
        claimed += 1;
        match enrich(&ctx, claim.pid) {
            Ok(process) => {
                if result_tx.send((claim.index, process)).is_err() {
                    break;
                }
            }
            Err(e) => {
                first_error.record(e)?;
                break;
            }
        }
    }
    debug!("collector {}: claimed {} processes", worker, claimed);
    Ok(claimed)
}

/// Spawn `num_threads` collectors over `queue`. Caller must drop its sender after this so the
/// result channel closes once every collector has exited.
pub fn spawn_collectors(
    queue: &WorkQueue,
    result_tx: &Sender<Collected>,
    ctx: &CollectContext,
    first_error: &FirstError,
    num_threads: usize,
) -> Result<Vec<JoinHandle<Result<usize>>>> {
    (0..num_threads)
        .map(|worker| {
            let queue = queue.clone();
            let result_tx = result_tx.clone();
            let ctx = ctx.clone();
            let first_error = first_error.clone();
            thread::Builder::new()
                .name(format!("{}-collector-{}", env!("CARGO_PKG_NAME"), worker))
                .spawn(move || collector_loop(worker, queue, result_tx, ctx, first_error))
                .context("failed to create a thread")
        })
        .collect()
}

/// Join barrier. Returns the total number of claims.
pub fn join_collectors(handles: Vec<JoinHandle<Result<usize>>>) -> Result<usize> {
    let mut total = 0;
    for h in handles {
        total += h
            .join()
            .map_err(|_| anyhow!("collector thread panicked"))??;
    }
    Ok(total)
}

/// Fan `stubs` out to the collector pool and return the enriched processes in enumeration order.
pub fn run_collectors(
    ctx: &CollectContext,
    stubs: &[ProcessStub],
    tuning: &PipelineTuning,
) -> Result<Vec<Process>> {
    let queue = WorkQueue::publish(stubs)?;
    let (result_tx, result_rx) = unbounded::<Collected>();
    let first_error = FirstError::new();

    let handles = spawn_collectors(&queue, &result_tx, ctx, &first_error, tuning.num_threads)?;
    // Dropping the last sender closes the channel once collectors exit.
    drop(result_tx);

    let mut slots: Vec<Option<Process>> = Vec::new();
    slots.resize_with(stubs.len(), || None);
    while let Ok((index, process)) = result_rx.recv() {
        slots[index] = Some(process);
    }

    let claimed = join_collectors(handles)?;
    first_error.into_result()?;
    debug!(
        "collection done: {} claimed of {} published",
        claimed,
        queue.total()
    );
    Ok(slots.into_iter().flatten().collect())
}

/// Main orchestrator: enumerate the process table, then enrich every process in parallel.
pub fn collect_snapshot(opts: &Opts) -> Result<Snapshot> {
    let ctx = CollectContext::from(opts);
    let stubs = collect_process_stubs(ctx.proc_root())?;
    let tuning = PipelineTuning::for_run(opts.num_threads, stubs.len());
    debug!("collecting with {} threads", tuning.num_threads);
    let processes = run_collectors(&ctx, &stubs, &tuning)?;
    Ok(Snapshot { processes })
}

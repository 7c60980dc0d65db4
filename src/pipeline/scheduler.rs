//! Work queue for the collector pool.
//!
//! The whole process list is loaded and the producer side closed before any collector starts, so
//! a claim never waits for publication: it either takes the next position or reports no work.

use anyhow::{Result, anyhow};
use crossbeam_channel::{Receiver, TryRecvError, bounded};

use crate::ProcessStub;

/// One claimed position in the published list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Claim {
    /// Position in the enumeration order.
    pub index: usize,
    pub pid: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueState {
    /// Published, nothing claimed yet.
    Published,
    /// Some positions claimed, some left.
    Draining,
    /// Every position claimed.
    Done,
}

/// Shared cursor over a fixed list. Clone one handle per collector.
#[derive(Clone, Debug)]
pub struct WorkQueue {
    rx: Receiver<Claim>,
    total: usize,
}

impl WorkQueue {
    /// Load every stub in order and close the producer side.
    pub fn publish(stubs: &[ProcessStub]) -> Result<Self> {
        let (tx, rx) = bounded::<Claim>(stubs.len().max(1));
        for (index, stub) in stubs.iter().enumerate() {
            tx.send(Claim {
                index,
                pid: stub.pid,
            })
            .map_err(|_| anyhow!("failed to publish process {}", stub.pid))?;
        }
        // Dropping the only sender: once drained, claims report no work instead of waiting.
        drop(tx);
        Ok(Self {
            rx,
            total: stubs.len(),
        })
    }

    /// Take the next unclaimed position, or `None` when the list is exhausted.
    pub fn claim(&self) -> Option<Claim> {
        match self.rx.try_recv() {
            Ok(claim) => Some(claim),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn remaining(&self) -> usize {
        self.rx.len()
    }

    pub fn state(&self) -> QueueState {
        match self.remaining() {
            0 => QueueState::Done,
            n if n == self.total => QueueState::Published,
            _ => QueueState::Draining,
        }
    }
}

use anyhow::{Error, Result, anyhow};
use std::sync::{Arc, Mutex};

/// First fatal error raised by any collector. Later errors are dropped.
#[derive(Clone, Debug, Default)]
pub struct FirstError {
    slot: Arc<Mutex<Option<Error>>>,
}

impl FirstError {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `err` unless an earlier one is already recorded.
    pub fn record(&self, err: Error) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("failed to lock the error slot"))?;
        slot.get_or_insert(err);
        Ok(())
    }

    /// True once any collector has failed; collectors stop claiming.
    pub fn is_set(&self) -> bool {
        self.slot.lock().map(|slot| slot.is_some()).unwrap_or(true)
    }

    /// Call after joining the collectors: the recorded error, if any.
    pub fn into_result(self) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("failed to lock the error slot"))?;
        let recorded = slot.take();
        match recorded {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

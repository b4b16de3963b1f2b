//! Concurrency gate bounding simultaneous in-flight dispatches.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::{Error, Result};

/// Bounded admission control for dispatch attempts.
///
/// An unset limit degrades to a no-op gate. A permit is held only across a
/// single network round trip; dropping it releases the slot, so a caller
/// sleeping in backoff never starves others.
#[derive(Clone)]
pub struct ConcurrencyLimit {
    semaphore: Option<Arc<Semaphore>>,
}

impl ConcurrencyLimit {
    pub fn new(max_concurrent: Option<usize>) -> Self {
        Self {
            semaphore: max_concurrent.map(|n| Arc::new(Semaphore::new(n.max(1)))),
        }
    }

    /// Wait for a slot. Returns `None` when the gate is unlimited.
    pub async fn acquire(&self) -> Result<Option<OwnedSemaphorePermit>> {
        match &self.semaphore {
            Some(sem) => Ok(Some(
                sem.clone()
                    .acquire_owned()
                    .await
                    .map_err(|_| Error::Runtime("concurrency semaphore closed".to_string()))?,
            )),
            None => Ok(None),
        }
    }
}

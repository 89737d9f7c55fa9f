//! Deferred geometry reconciliation
//!
//! Token positions can still shift after a state change is rendered, so the
//! engine samples geometry once immediately and once more after a short delay.
//! At most one follow-up pass is pending at a time: scheduling a new one
//! supersedes the old, and switching examples or modes cancels it outright,
//! so a stale pass can never overwrite fresh geometry.
//!
//! Time is a virtual clock (`Duration` since session start) supplied by the
//! caller; nothing here sleeps or spawns.

use std::time::Duration;
use tracing::debug;

/// Identifies one scheduled pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Pending {
    handle: TaskHandle,
    due: Duration,
}

/// Single-slot cancellable timer
#[derive(Debug, Default)]
pub struct ReconcileTimer {
    next_id: u64,
    pending: Option<Pending>,
}

impl ReconcileTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a pass at `now + delay`, superseding any pending one
    pub fn schedule(&mut self, now: Duration, delay: Duration) -> TaskHandle {
        if let Some(old) = self.pending.take() {
            debug!("Reconcile {:?} superseded", old.handle);
        }
        let handle = TaskHandle(self.next_id);
        self.next_id += 1;
        self.pending = Some(Pending {
            handle,
            due: now + delay,
        });
        handle
    }

    /// Cancel the pending pass, returning its handle
    pub fn cancel(&mut self) -> Option<TaskHandle> {
        let cancelled = self.pending.take().map(|p| p.handle);
        if let Some(handle) = cancelled {
            debug!("Reconcile {:?} cancelled", handle);
        }
        cancelled
    }

    /// Handle of the pending pass
    pub fn pending(&self) -> Option<TaskHandle> {
        self.pending.map(|p| p.handle)
    }

    /// When the pending pass is due
    pub fn due_at(&self) -> Option<Duration> {
        self.pending.map(|p| p.due)
    }

    /// Take the pending pass if it is due at `now`
    pub fn fire_due(&mut self, now: Duration) -> Option<TaskHandle> {
        match self.pending {
            Some(p) if p.due <= now => {
                self.pending = None;
                Some(p.handle)
            }
            _ => None,
        }
    }
}

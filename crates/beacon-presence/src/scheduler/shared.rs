//! State shared between the scheduler handle and its background threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use parking_lot::{Condvar, Mutex};

/// Work waiting for the publisher thread.
#[derive(Debug, Default)]
pub(super) struct Pending {
    /// When the next render-and-publish should happen. Last writer wins.
    pub deadline: Option<Instant>,
}

/// Both condvars pair with `pending`. Cancellation flags are checked while
/// holding it, so a notify sent after setting a flag is never lost.
pub(super) struct Shared<P> {
    pub pending: Mutex<Pending>,
    pub publish_cv: Condvar,
    pub pump_cv: Condvar,
    pub last_published: Mutex<Option<P>>,
}

impl<P> Shared<P> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Pending::default()),
            publish_cv: Condvar::new(),
            pump_cv: Condvar::new(),
            last_published: Mutex::new(None),
        }
    }

    /// Wake every background thread so it re-checks its cancel flag.
    pub fn wake_all(&self) {
        let _pending = self.pending.lock();
        self.publish_cv.notify_all();
        self.pump_cv.notify_all();
    }

    /// Cancel one generation and drop the deadline it was waiting on.
    ///
    /// Both happen under the `pending` lock, so a publisher can never act on
    /// the dropped deadline, and a request made afterwards survives for the
    /// next generation.
    pub fn cancel_generation(&self, cancel: &AtomicBool) {
        let mut pending = self.pending.lock();
        cancel.store(true, Ordering::SeqCst);
        pending.deadline = None;
        self.publish_cv.notify_all();
        self.pump_cv.notify_all();
    }

    /// Record a successful publish unless its generation was cancelled.
    ///
    /// Checked under the `last_published` lock: `forget_published` runs only
    /// after the flag is set, so a late write from a detached thread cannot
    /// land after it.
    pub fn record_published(&self, cancel: &AtomicBool, payload: P) {
        let mut last = self.last_published.lock();
        if !cancel.load(Ordering::SeqCst) {
            *last = Some(payload);
        }
    }

    pub fn forget_published(&self) {
        *self.last_published.lock() = None;
    }
}

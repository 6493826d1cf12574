//! Background loops: the callback pump and the delayed publisher.
//!
//! Neither loop ever returns early on error. Transport failures are logged
//! at `warn`, panics in collaborator code are caught and logged at `error`.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::MutexGuard;
use tracing::{debug, error, trace, warn};

use super::shared::Shared;
use crate::transport::Transport;

// ---------------------------------------------------------------------------
// Pump
// ---------------------------------------------------------------------------

pub(super) fn pump_loop<P>(
    shared: Arc<Shared<P>>,
    transport: Arc<dyn Transport<P>>,
    cancel: Arc<AtomicBool>,
    interval: Duration,
) {
    debug!(?interval, "presence pump started");
    while !cancel.load(Ordering::SeqCst) {
        match panic::catch_unwind(AssertUnwindSafe(|| transport.pump_callbacks())) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "presence callback pump failed"),
            Err(payload) => error!(panic = %panic_message(&*payload), "presence callback pump panicked"),
        }

        let wake_at = Instant::now().checked_add(interval);
        let mut pending = shared.pending.lock();
        while !cancel.load(Ordering::SeqCst) {
            match wake_at {
                Some(at) => {
                    if shared.pump_cv.wait_until(&mut pending, at).timed_out() {
                        break;
                    }
                }
                None => shared.pump_cv.wait(&mut pending),
            }
        }
    }
    debug!("presence pump stopped");
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

pub(super) fn publish_loop<P, C, S, R>(
    shared: Arc<Shared<P>>,
    transport: Arc<dyn Transport<P>>,
    cancel: Arc<AtomicBool>,
    supplier: S,
    renderer: R,
) where
    P: PartialEq,
    S: Fn() -> C,
    R: Fn(C) -> P,
{
    debug!("presence publisher started");
    let mut pending = shared.pending.lock();
    loop {
        if cancel.load(Ordering::SeqCst) {
            break;
        }
        match pending.deadline {
            None => shared.publish_cv.wait(&mut pending),
            Some(deadline) if Instant::now() < deadline => {
                // Woken early or timed out: either way the deadline is
                // re-read on the next pass, it may have moved.
                shared.publish_cv.wait_until(&mut pending, deadline);
            }
            Some(_) => {
                pending.deadline = None;
                MutexGuard::unlocked(&mut pending, || {
                    render_and_publish(&shared, transport.as_ref(), &cancel, &supplier, &renderer)
                });
            }
        }
    }
    debug!("presence publisher stopped");
}

fn render_and_publish<P, C>(
    shared: &Shared<P>,
    transport: &dyn Transport<P>,
    cancel: &AtomicBool,
    supplier: &dyn Fn() -> C,
    renderer: &dyn Fn(C) -> P,
) where
    P: PartialEq,
{
    let payload = match panic::catch_unwind(AssertUnwindSafe(|| renderer(supplier()))) {
        Ok(payload) => payload,
        Err(panic) => {
            error!(panic = %panic_message(&*panic), "presence render panicked");
            return;
        }
    };

    if shared.last_published.lock().as_ref() == Some(&payload) {
        trace!("presence unchanged, skipping publish");
        return;
    }
    if cancel.load(Ordering::SeqCst) {
        return;
    }

    match panic::catch_unwind(AssertUnwindSafe(|| transport.publish(&payload))) {
        Ok(Ok(())) => {
            debug!("presence published");
            shared.record_published(cancel, payload);
        }
        Ok(Err(e)) => warn!(error = %e, "presence publish failed"),
        Err(panic) => error!(panic = %panic_message(&*panic), "presence publish panicked"),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

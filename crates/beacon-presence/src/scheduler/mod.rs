//! Debounced broadcast scheduler.
//!
//! Owns two background threads per running generation:
//!
//! - `presence-pump` drives [`Transport::pump_callbacks`] every pump interval.
//! - `presence-publisher` waits for the latest requested deadline, then
//!   renders a payload and publishes it if it differs from the last one.
//!
//! [`PresenceScheduler::request_update`] overwrites the deadline, so a burst
//! of requests collapses into one publish timed from the last request.

mod shared;
mod tasks;


use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use beacon_common::BeaconError;
use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::transport::{EventHandlers, Transport};
use shared::Shared;

/// Default period between two callback pumps.
pub const DEFAULT_PUMP_INTERVAL: Duration = Duration::from_millis(2000);

const PUMP_THREAD: &str = "presence-pump";
const PUBLISHER_THREAD: &str = "presence-publisher";

/// Externally visible lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Uninitialized,
    Running,
    /// `dispose` is tearing down; threads may still be finishing.
    Disposing,
    Disposed,
}

struct Tasks {
    cancel: Arc<AtomicBool>,
    publisher: JoinHandle<()>,
    pump: JoinHandle<()>,
}

enum Lifecycle {
    Uninitialized,
    Running(Tasks),
    Disposing,
    Disposed,
}

impl Lifecycle {
    fn state(&self) -> SchedulerState {
        match self {
            Lifecycle::Uninitialized => SchedulerState::Uninitialized,
            Lifecycle::Running(_) => SchedulerState::Running,
            Lifecycle::Disposing => SchedulerState::Disposing,
            Lifecycle::Disposed => SchedulerState::Disposed,
        }
    }
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Coalesces update requests into delayed, deduplicated publishes.
///
/// `init` and `dispose` are idempotent. Dropping a running scheduler
/// disposes it.
pub struct PresenceScheduler<P> {
    transport: Arc<dyn Transport<P>>,
    pump_interval: Duration,
    shared: Arc<Shared<P>>,
    lifecycle: Mutex<Lifecycle>,
}

impl<P> PresenceScheduler<P> {
    pub fn new(transport: Arc<dyn Transport<P>>) -> Self {
        Self {
            transport,
            pump_interval: DEFAULT_PUMP_INTERVAL,
            shared: Arc::new(Shared::new()),
            lifecycle: Mutex::new(Lifecycle::Uninitialized),
        }
    }

    /// Override the callback pump period. Takes effect on the next `init`.
    pub fn with_pump_interval(mut self, interval: Duration) -> Self {
        self.pump_interval = interval;
        self
    }

    pub fn pump_interval(&self) -> Duration {
        self.pump_interval
    }

    pub fn state(&self) -> SchedulerState {
        self.lifecycle.lock().state()
    }

    pub fn is_running(&self) -> bool {
        self.state() == SchedulerState::Running
    }

    /// Schedule a render-and-publish `delay` from now, replacing any pending
    /// deadline. When not running, the deadline is kept for the next `init`.
    pub fn request_update(&self, delay: Duration) {
        let Some(deadline) = Instant::now().checked_add(delay) else {
            warn!(?delay, "update delay out of range, request ignored");
            return;
        };
        self.shared.pending.lock().deadline = Some(deadline);
        // A detached thread from a previous generation may also be parked
        // on this condvar, so wake everyone.
        self.shared.publish_cv.notify_all();
    }

    /// Stop both background threads and disconnect the transport.
    ///
    /// No-op unless running. Safe to call from any thread, including from
    /// inside a transport callback: the calling thread is never joined.
    /// A disconnect failure is returned after teardown has completed.
    pub fn dispose(&self) -> beacon_common::Result<()> {
        let tasks = {
            let mut lifecycle = self.lifecycle.lock();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Disposing) {
                Lifecycle::Running(tasks) => tasks,
                other => {
                    *lifecycle = other;
                    return Ok(());
                }
            }
        };

        info!("stopping presence scheduler");
        self.shared.cancel_generation(&tasks.cancel);

        join_unless_current(tasks.publisher);
        let disconnected = self.transport.disconnect();
        join_unless_current(tasks.pump);

        self.shared.forget_published();
        *self.lifecycle.lock() = Lifecycle::Disposed;

        match disconnected {
            Ok(()) => {
                info!("presence scheduler stopped");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "presence transport failed to disconnect");
                Err(e.into())
            }
        }
    }
}

impl<P: Clone> PresenceScheduler<P> {
    /// The payload most recently published successfully in this generation.
    pub fn last_published(&self) -> Option<P> {
        self.shared.last_published.lock().clone()
    }
}

impl<P: PartialEq + Send + 'static> PresenceScheduler<P> {
    /// Connect the transport and start the background threads.
    ///
    /// No-op when already running. Works after `dispose`, starting a fresh
    /// generation. The connect happens under the lifecycle lock, so handlers
    /// the transport fires synchronously from `connect` must not call back
    /// into this scheduler's `init`, `dispose` or `state`.
    ///
    /// # Errors
    ///
    /// Besides connect and thread spawn failures, returns
    /// [`BeaconError::Lifecycle`] while another thread is inside `dispose`.
    /// That `Disposing` window is a state of its own, not a no-op
    /// transition: the old generation's threads may still be running and
    /// the transport is not yet disconnected, so starting a new one would
    /// race the teardown. Retry once `state()` reports `Disposed`.
    pub fn init<C, S, R>(
        &self,
        handlers: EventHandlers,
        client_id: &str,
        supplier: S,
        renderer: R,
    ) -> beacon_common::Result<()>
    where
        C: 'static,
        S: Fn() -> C + Send + 'static,
        R: Fn(C) -> P + Send + 'static,
    {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running(_) => return Ok(()),
            Lifecycle::Disposing => {
                return Err(BeaconError::Lifecycle(
                    "cannot init while dispose is in progress".into(),
                ))
            }
            Lifecycle::Uninitialized | Lifecycle::Disposed => {}
        }

        self.transport.connect(client_id, handlers)?;
        let cancel = Arc::new(AtomicBool::new(false));

        let publisher = thread::Builder::new().name(PUBLISHER_THREAD.into()).spawn({
            let shared = Arc::clone(&self.shared);
            let transport = Arc::clone(&self.transport);
            let cancel = Arc::clone(&cancel);
            move || tasks::publish_loop(shared, transport, cancel, supplier, renderer)
        });
        let publisher = match publisher {
            Ok(handle) => handle,
            Err(e) => {
                self.abort_start(None);
                return Err(BeaconError::Lifecycle(format!(
                    "failed to spawn {PUBLISHER_THREAD}: {e}"
                )));
            }
        };

        let pump = thread::Builder::new().name(PUMP_THREAD.into()).spawn({
            let shared = Arc::clone(&self.shared);
            let transport = Arc::clone(&self.transport);
            let cancel = Arc::clone(&cancel);
            let interval = self.pump_interval;
            move || tasks::pump_loop(shared, transport, cancel, interval)
        });
        let pump = match pump {
            Ok(handle) => handle,
            Err(e) => {
                self.abort_start(Some((cancel, publisher)));
                return Err(BeaconError::Lifecycle(format!(
                    "failed to spawn {PUMP_THREAD}: {e}"
                )));
            }
        };

        *lifecycle = Lifecycle::Running(Tasks {
            cancel,
            publisher,
            pump,
        });
        info!(
            client_id,
            pump_interval_ms = self.pump_interval.as_millis() as u64,
            "presence scheduler started"
        );
        Ok(())
    }

    /// Undo a half-finished `init`. The lifecycle state is left untouched.
    fn abort_start(&self, publisher: Option<(Arc<AtomicBool>, JoinHandle<()>)>) {
        if let Some((cancel, handle)) = publisher {
            cancel.store(true, Ordering::SeqCst);
            self.shared.wake_all();
            join_unless_current(handle);
        }
        if let Err(e) = self.transport.disconnect() {
            warn!(error = %e, "presence transport failed to disconnect after aborted start");
        }
    }
}

impl<P> Drop for PresenceScheduler<P> {
    fn drop(&mut self) {
        if let Err(e) = self.dispose() {
            warn!(error = %e, "presence scheduler dispose on drop failed");
        }
    }
}

impl<P> std::fmt::Debug for PresenceScheduler<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceScheduler")
            .field("state", &self.state())
            .field("pump_interval", &self.pump_interval)
            .finish_non_exhaustive()
    }
}

fn join_unless_current(handle: JoinHandle<()>) {
    let name = handle.thread().name().unwrap_or("unnamed").to_string();
    if handle.thread().id() == thread::current().id() {
        // Called from inside this task; it exits on its next cancel check.
        return;
    }
    if handle.join().is_err() {
        error!(thread = %name, "presence task panicked");
    }
}

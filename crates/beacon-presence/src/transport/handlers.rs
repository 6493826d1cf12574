//! Callbacks a transport invokes while connected.

use std::fmt;

pub type ReadyHandler = Box<dyn Fn() + Send + Sync>;
pub type StatusHandler = Box<dyn Fn(i32, &str) + Send + Sync>;

/// Optional connection callbacks handed to [`Transport::connect`].
///
/// [`Transport::connect`]: super::Transport::connect
#[derive(Default)]
pub struct EventHandlers {
    pub ready: Option<ReadyHandler>,
    pub disconnected: Option<StatusHandler>,
    pub errored: Option<StatusHandler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_ready(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.ready = Some(Box::new(f));
        self
    }

    pub fn on_disconnected(mut self, f: impl Fn(i32, &str) + Send + Sync + 'static) -> Self {
        self.disconnected = Some(Box::new(f));
        self
    }

    pub fn on_errored(mut self, f: impl Fn(i32, &str) + Send + Sync + 'static) -> Self {
        self.errored = Some(Box::new(f));
        self
    }

    pub fn fire_ready(&self) {
        if let Some(f) = &self.ready {
            f();
        }
    }

    pub fn fire_disconnected(&self, code: i32, message: &str) {
        if let Some(f) = &self.disconnected {
            f(code, message);
        }
    }

    pub fn fire_errored(&self, code: i32, message: &str) {
        if let Some(f) = &self.errored {
            f(code, message);
        }
    }
}

impl fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("ready", &self.ready.is_some())
            .field("disconnected", &self.disconnected.is_some())
            .field("errored", &self.errored.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn empty_handlers_do_nothing() {
        let handlers = EventHandlers::new();
        handlers.fire_ready();
        handlers.fire_disconnected(1, "bye");
        handlers.fire_errored(2, "oops");
        assert_eq!(
            format!("{handlers:?}"),
            "EventHandlers { ready: false, disconnected: false, errored: false }"
        );
    }

    #[test]
    fn fires_registered_callbacks() {
        let ready = Arc::new(AtomicUsize::new(0));
        let code = Arc::new(AtomicI32::new(0));

        let handlers = EventHandlers::new()
            .on_ready({
                let ready = Arc::clone(&ready);
                move || {
                    ready.fetch_add(1, Ordering::SeqCst);
                }
            })
            .on_errored({
                let code = Arc::clone(&code);
                move |c, _| code.store(c, Ordering::SeqCst)
            });

        handlers.fire_ready();
        handlers.fire_errored(42, "boom");
        handlers.fire_disconnected(7, "ignored");

        assert_eq!(ready.load(Ordering::SeqCst), 1);
        assert_eq!(code.load(Ordering::SeqCst), 42);
    }
}

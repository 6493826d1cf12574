//! Transport that writes every call to the log instead of a remote service.

use std::sync::atomic::{AtomicBool, Ordering};

use beacon_common::TransportError;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{info, trace};

use super::{EventHandlers, Transport};

/// Logs payloads as JSON. Useful for running the service without a
/// presence backend.
#[derive(Debug, Default)]
pub struct LogTransport {
    connected: AtomicBool,
    client_id: Mutex<Option<String>>,
    handlers: Mutex<Option<EventHandlers>>,
}

impl LogTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

impl<P: Serialize> Transport<P> for LogTransport {
    fn connect(&self, client_id: &str, handlers: EventHandlers) -> Result<(), TransportError> {
        if self.connected.swap(true, Ordering::SeqCst) {
            return Err(TransportError::Connect("already connected".into()));
        }
        info!(client_id, "presence transport connected");
        handlers.fire_ready();
        *self.client_id.lock() = Some(client_id.to_string());
        *self.handlers.lock() = Some(handlers);
        Ok(())
    }

    fn pump_callbacks(&self) -> Result<(), TransportError> {
        if !self.is_connected() {
            return Err(TransportError::Callback("not connected".into()));
        }
        trace!("presence transport callbacks pumped");
        Ok(())
    }

    fn publish(&self, payload: &P) -> Result<(), TransportError> {
        if !self.is_connected() {
            return Err(TransportError::Publish("not connected".into()));
        }
        let json = serde_json::to_string(payload)
            .map_err(|e| TransportError::Publish(format!("failed to serialize payload: {e}")))?;
        info!(payload = %json, "presence published");
        Ok(())
    }

    fn disconnect(&self) -> Result<(), TransportError> {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return Err(TransportError::Disconnect("not connected".into()));
        }
        let client_id = self.client_id.lock().take().unwrap_or_default();
        if let Some(handlers) = self.handlers.lock().take() {
            handlers.fire_disconnected(0, "shutdown");
        }
        info!(client_id = %client_id, "presence transport disconnected");
        Ok(())
    }
}

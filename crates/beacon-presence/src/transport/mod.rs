//! Seam between the scheduler and whatever actually publishes presence.

mod handlers;
mod log;

pub use handlers::{EventHandlers, ReadyHandler, StatusHandler};
pub use log::LogTransport;

use beacon_common::TransportError;

/// Publishes presence payloads to an external service.
///
/// Every method may block briefly. `pump_callbacks` performs one step of the
/// transport's internal event processing and is called repeatedly from a
/// dedicated thread; it is where event handlers get invoked.
pub trait Transport<P>: Send + Sync {
    fn connect(&self, client_id: &str, handlers: EventHandlers) -> Result<(), TransportError>;

    fn pump_callbacks(&self) -> Result<(), TransportError>;

    fn publish(&self, payload: &P) -> Result<(), TransportError>;

    fn disconnect(&self) -> Result<(), TransportError>;
}

//! Debounced presence broadcasting.
//!
//! The [`PresenceScheduler`] collapses bursts of update requests into a
//! single render-and-publish step, while a second background thread drives
//! the transport's callback processing. The [`PresenceService`] ties the
//! scheduler to a workspace registry and exposes the editor event hooks.

pub mod payload;
pub mod scheduler;
pub mod service;
pub mod transport;

pub use payload::{render, PresencePayload, RenderContext};
pub use scheduler::{PresenceScheduler, SchedulerState, DEFAULT_PUMP_INTERVAL};
pub use service::PresenceService;
pub use transport::{EventHandlers, LogTransport, Transport};

//! Event-source adapter: editor hooks in, debounced presence out.

use std::sync::Arc;

use beacon_common::ModelError;
use beacon_config::{BeaconConfig, DisplayConfig, PresenceConfig};
use beacon_workspace::{ResourceEntry, SnapshotRegistry, WorkspaceEntry, WorkspaceSettings};
use chrono::Utc;
use tracing::{debug, info};

use crate::payload::{render, PresencePayload, RenderContext};
use crate::scheduler::PresenceScheduler;
use crate::transport::{EventHandlers, Transport};

/// Owns the workspace registry and the scheduler that broadcasts it.
///
/// Every hook mutates the registry first, then requests an update with the
/// configured debounce delay.
#[derive(Debug)]
pub struct PresenceService {
    registry: Arc<SnapshotRegistry>,
    scheduler: PresenceScheduler<PresencePayload>,
    presence: PresenceConfig,
    display: DisplayConfig,
}

impl PresenceService {
    pub fn new(config: &BeaconConfig, transport: Arc<dyn Transport<PresencePayload>>) -> Self {
        let scheduler =
            PresenceScheduler::new(transport).with_pump_interval(config.presence.pump_interval());
        Self {
            registry: Arc::new(SnapshotRegistry::new()),
            scheduler,
            presence: config.presence.clone(),
            display: config.display.clone(),
        }
    }

    pub fn registry(&self) -> &Arc<SnapshotRegistry> {
        &self.registry
    }

    pub fn scheduler(&self) -> &PresenceScheduler<PresencePayload> {
        &self.scheduler
    }

    /// Connect and start broadcasting. Does nothing when presence is
    /// disabled in the config.
    pub fn start(&self, handlers: EventHandlers) -> beacon_common::Result<()> {
        if !self.presence.enabled {
            info!("presence disabled, not starting");
            return Ok(());
        }
        let registry = Arc::clone(&self.registry);
        let display = self.display.clone();
        self.scheduler.init(
            handlers,
            &self.presence.client_id,
            move || RenderContext::capture(&registry, &display),
            render,
        )?;
        // Publish whatever is already open.
        self.request_update();
        Ok(())
    }

    pub fn stop(&self) -> beacon_common::Result<()> {
        self.scheduler.dispose()
    }

    // -- hooks --------------------------------------------------------------

    pub fn workspace_opened(&self, entry: WorkspaceEntry) -> Result<(), ModelError> {
        self.registry.add_workspace(entry)?;
        self.request_update();
        Ok(())
    }

    pub fn workspace_closed(&self, key: &str) -> Option<WorkspaceEntry> {
        let removed = self.registry.remove_workspace(key);
        if removed.is_some() {
            self.request_update();
        }
        removed
    }

    /// Track a resource and mark its workspace as the most recently used.
    pub fn resource_opened(&self, workspace: &str, resource: ResourceEntry) -> Result<(), ModelError> {
        self.registry.touch_resource(workspace, resource, Utc::now())?;
        self.request_update();
        Ok(())
    }

    pub fn resource_closed(
        &self,
        workspace: &str,
        resource: &str,
    ) -> Result<Option<ResourceEntry>, ModelError> {
        let removed = self.registry.remove_resource(workspace, resource)?;
        self.request_update();
        Ok(removed)
    }

    pub fn settings_changed(
        &self,
        workspace: &str,
        settings: WorkspaceSettings,
    ) -> Result<(), ModelError> {
        self.registry.update_settings(workspace, settings)?;
        self.request_update();
        Ok(())
    }

    fn request_update(&self) {
        debug!(delay_ms = self.presence.update_delay_ms, "presence update requested");
        self.scheduler.request_update(self.presence.update_delay());
    }
}

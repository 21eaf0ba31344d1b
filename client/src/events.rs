//! Data-changed notifications between views
//!
//! Mutations publish which kind of resource changed; views that show that
//! resource subscribe and re-fetch from the backend.

use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Kinds of backend data a view may be showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Items,
    Sectors,
    Stock,
    Movements,
    Settings,
    Users,
}

/// Published after a successful mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataChanged {
    pub resource: Resource,
}

/// Broadcast channel for [`DataChanged`] events
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DataChanged>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish a change; returns how many subscribers received it
    pub fn publish(&self, resource: Resource) -> usize {
        debug!(?resource, "Publishing data change");
        self.sender.send(DataChanged { resource }).unwrap_or(0)
    }

    pub fn publish_all(&self, resources: &[Resource]) {
        for resource in resources {
            self.publish(*resource);
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.sender.subscribe()
    }

    /// Subscribe to a subset of resources only
    pub fn watch(&self, resources: &[Resource]) -> ResourceWatcher {
        ResourceWatcher {
            receiver: self.sender.subscribe(),
            resources: resources.to_vec(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

/// Receiver filtered down to the resources a view cares about
#[derive(Debug)]
pub struct ResourceWatcher {
    receiver: broadcast::Receiver<DataChanged>,
    resources: Vec<Resource>,
}

impl ResourceWatcher {
    /// Wait for the next relevant change; `None` once the bus is gone
    ///
    /// If events were dropped because this watcher fell behind, the first
    /// watched resource is reported so the view refreshes anyway.
    pub async fn changed(&mut self) -> Option<Resource> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.resources.contains(&event.resource) => {
                    return Some(event.resource)
                }
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Data change watcher lagged");
                    return self.resources.first().copied();
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`ResourceWatcher::changed`]
    pub fn try_changed(&mut self) -> Option<Resource> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.resources.contains(&event.resource) => {
                    return Some(event.resource)
                }
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Lagged(_)) => {
                    return self.resources.first().copied()
                }
                Err(_) => return None,
            }
        }
    }
}

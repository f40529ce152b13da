//! Observers that receive activity events

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, error, info, trace};

use crate::error::{ActivityLogError, ActivityLogResult};
use crate::events::{ActivityEvent, ActivityType, ProjectActivity};

/// Receiver of activity events.
///
/// Implementations must not block; the generation pipeline publishes inline.
pub trait ActivitySink: Send + Sync {
    /// Deliver an event for a project
    fn publish(&self, project_id: &str, event: &ActivityEvent);
}

/// Fan-out sink backed by a tokio broadcast channel
pub struct ChannelSink {
    sender: broadcast::Sender<ProjectActivity>,
}

impl ChannelSink {
    /// Default number of buffered events per subscriber
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a sink with the default buffer size
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::DEFAULT_CAPACITY);
        Self { sender }
    }

    /// Create a sink with a custom buffer size
    pub fn with_capacity(capacity: usize) -> ActivityLogResult<Self> {
        if capacity == 0 {
            return Err(ActivityLogError::ConfigError {
                field: "capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        let (sender, _) = broadcast::channel(capacity);
        Ok(Self { sender })
    }

    /// Subscribe to every project's events
    pub fn subscribe(&self) -> broadcast::Receiver<ProjectActivity> {
        self.sender.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChannelSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySink for ChannelSink {
    fn publish(&self, project_id: &str, event: &ActivityEvent) {
        let activity = ProjectActivity::new(project_id, event.clone());
        if self.sender.send(activity).is_err() {
            trace!(project_id, "No activity subscribers; event dropped");
        }
    }
}

/// Sink that keeps events in memory, for tests and replay.
///
/// [`MemorySink::new`] never discards anything. Use [`MemorySink::bounded`] for
/// long-lived sinks; it keeps only the most recent events.
#[derive(Default)]
pub struct MemorySink {
    events: Mutex<VecDeque<ProjectActivity>>,
    capacity: Option<usize>,
}

impl MemorySink {
    /// Create an empty, unbounded sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sink that retains at most `capacity` events, oldest dropped first
    pub fn bounded(capacity: usize) -> ActivityLogResult<Self> {
        if capacity == 0 {
            return Err(ActivityLogError::ConfigError {
                field: "capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(Self {
            events: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        })
    }

    /// Retention limit, if any
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Snapshot of recorded events in publish order
    pub fn events(&self) -> Vec<ProjectActivity> {
        self.events.lock().iter().cloned().collect()
    }

    /// Recorded events of one type
    pub fn events_of(&self, activity_type: ActivityType) -> Vec<ProjectActivity> {
        self.events
            .lock()
            .iter()
            .filter(|a| a.event.activity_type == activity_type)
            .cloned()
            .collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drop everything recorded so far
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl ActivitySink for MemorySink {
    fn publish(&self, project_id: &str, event: &ActivityEvent) {
        let mut events = self.events.lock();
        if let Some(capacity) = self.capacity {
            while events.len() >= capacity {
                events.pop_front();
            }
        }
        events.push_back(ProjectActivity::new(project_id, event.clone()));
    }
}

/// Sink that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ActivitySink for TracingSink {
    fn publish(&self, project_id: &str, event: &ActivityEvent) {
        match event.activity_type {
            ActivityType::Error => {
                error!(project_id, kind = %event.activity_type, "{}", event.message)
            }
            ActivityType::Prompt | ActivityType::Response => {
                debug!(project_id, kind = %event.activity_type, "{}", event.message)
            }
            ActivityType::Info | ActivityType::Processing => {
                info!(project_id, kind = %event.activity_type, "{}", event.message)
            }
        }
    }
}

//! Per-project activity logger

use std::sync::Arc;

use tracing::debug;

use crate::events::{ActivityEvent, ActivityType};
use crate::sinks::ActivitySink;

/// Publishes activity events for one project to an injected sink.
///
/// Cloning is cheap; clones share the sink.
#[derive(Clone)]
pub struct ActivityLogger {
    project_id: String,
    sink: Arc<dyn ActivitySink>,
}

impl ActivityLogger {
    /// Create a logger for a project
    pub fn new(project_id: impl Into<String>, sink: Arc<dyn ActivitySink>) -> Self {
        Self {
            project_id: project_id.into(),
            sink,
        }
    }

    /// Project this logger reports for
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Publish an event and return it
    pub fn log(
        &self,
        activity_type: ActivityType,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> ActivityEvent {
        let mut event = ActivityEvent::new(activity_type, message);
        event.data = data;

        debug!(
            "[{}] {}: {}",
            self.project_id,
            activity_type.as_str().to_uppercase(),
            event.message
        );
        self.sink.publish(&self.project_id, &event);
        event
    }

    /// Publish an `info` event
    pub fn info(&self, message: impl Into<String>, data: Option<serde_json::Value>) -> ActivityEvent {
        self.log(ActivityType::Info, message, data)
    }

    /// Publish a `prompt` event
    pub fn prompt(&self, message: impl Into<String>, data: Option<serde_json::Value>) -> ActivityEvent {
        self.log(ActivityType::Prompt, message, data)
    }

    /// Publish a `response` event
    pub fn response(
        &self,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> ActivityEvent {
        self.log(ActivityType::Response, message, data)
    }

    /// Publish a `processing` event
    pub fn processing(
        &self,
        message: impl Into<String>,
        data: Option<serde_json::Value>,
    ) -> ActivityEvent {
        self.log(ActivityType::Processing, message, data)
    }

    /// Publish an `error` event
    pub fn error(&self, message: impl Into<String>, data: Option<serde_json::Value>) -> ActivityEvent {
        self.log(ActivityType::Error, message, data)
    }
}

impl std::fmt::Debug for ActivityLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityLogger")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}

//! Activity events published while a generation run is in flight

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ActivityLogError, ActivityLogResult};

/// Kind of activity being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// General progress information
    Info,
    /// The prompt sent to the model
    Prompt,
    /// The raw model response
    Response,
    /// Parsing and organizing results
    Processing,
    /// A failure in the run
    Error,
}

impl ActivityType {
    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Info => "info",
            ActivityType::Prompt => "prompt",
            ActivityType::Response => "response",
            ActivityType::Processing => "processing",
            ActivityType::Error => "error",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ActivityLogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(ActivityType::Info),
            "prompt" => Ok(ActivityType::Prompt),
            "response" => Ok(ActivityType::Response),
            "processing" => Ok(ActivityType::Processing),
            "error" => Ok(ActivityType::Error),
            other => Err(ActivityLogError::UnknownType(other.to_string())),
        }
    }
}

/// A single activity event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Event kind
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Human-readable message
    pub message: String,
    /// Optional structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// When the event was created
    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    /// Create a new event stamped with the current time
    pub fn new(activity_type: ActivityType, message: impl Into<String>) -> Self {
        Self {
            activity_type,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach a structured payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// An event addressed to a project's activity channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectActivity {
    /// Project the event belongs to
    pub project_id: String,
    /// The event itself
    pub event: ActivityEvent,
}

impl ProjectActivity {
    /// Wrap an event for a project
    pub fn new(project_id: impl Into<String>, event: ActivityEvent) -> Self {
        Self {
            project_id: project_id.into(),
            event,
        }
    }

    /// Channel name subscribers listen on, `activity:{project_id}`
    pub fn channel(&self) -> String {
        channel_name(&self.project_id)
    }

    /// Serialize to a JSON string for transport
    pub fn to_json(&self) -> ActivityLogResult<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// Channel name for a project's activity stream
pub fn channel_name(project_id: &str) -> String {
    format!("activity:{project_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_roundtrip_through_str() {
        for ty in [
            ActivityType::Info,
            ActivityType::Prompt,
            ActivityType::Response,
            ActivityType::Processing,
            ActivityType::Error,
        ] {
            assert_eq!(ty.as_str().parse::<ActivityType>().unwrap(), ty);
        }
        assert!("verbose".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_event_serializes_type_field() {
        let event = ActivityEvent::new(ActivityType::Processing, "Parsing response")
            .with_data(serde_json::json!({"stories": 3}));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "processing");
        assert_eq!(json["message"], "Parsing response");
        assert_eq!(json["data"]["stories"], 3);
    }

    #[test]
    fn test_event_without_data_omits_field() {
        let event = ActivityEvent::new(ActivityType::Info, "hello");
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_channel_name() {
        let activity = ProjectActivity::new("p-42", ActivityEvent::new(ActivityType::Info, "x"));
        assert_eq!(activity.channel(), "activity:p-42");
        assert!(activity.to_json().unwrap().contains("\"projectId\":\"p-42\""));
    }
}

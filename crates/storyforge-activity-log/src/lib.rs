//! StoryForge Activity Logging
//!
//! Activity events describe the progress of a story-generation run (prompt sent,
//! response received, stories organized, failures). Events are handed to an
//! [`ActivitySink`] that the caller injects, so the parsing core never talks to a
//! process-wide emitter.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use storyforge_activity_log::{ActivityLogger, ChannelSink};
//!
//! # async fn example() {
//! let sink = Arc::new(ChannelSink::new());
//! let mut rx = sink.subscribe();
//!
//! let logger = ActivityLogger::new("project-1", sink.clone());
//! logger.info("Generating stories", None);
//!
//! let activity = rx.recv().await.unwrap();
//! assert_eq!(activity.channel(), "activity:project-1");
//! # }
//! ```

pub mod error;
pub mod events;
pub mod logger;
pub mod sinks;

pub use error::{ActivityLogError, ActivityLogResult};
pub use events::{channel_name, ActivityEvent, ActivityType, ProjectActivity};
pub use logger::ActivityLogger;
pub use sinks::{ActivitySink, ChannelSink, MemorySink, TracingSink};

#![warn(missing_docs)]

//! StoryForge story generation core
//!
//! Turns a free-text model response into structured features and user stories,
//! then groups the stories under features with a keyword-overlap heuristic.
//!
//! ```rust
//! use storyforge_stories::{ResponseParser, StoryOrganizer};
//!
//! let raw = "### Feature 1: Billing\n### Story 1: Send billing reminders\n**Priority:** High";
//! let parsed = ResponseParser::parse(raw);
//! let organized = StoryOrganizer::organize(&parsed.user_stories, &parsed.features);
//!
//! assert_eq!(organized.features[0].user_stories.len(), 1);
//! assert!(organized.standalone_stories.is_empty());
//! ```

pub mod error;
pub mod generator;
pub mod models;
pub mod organizer;
pub mod parser;
pub mod prompt;

pub use error::{GenerationError, Result};
pub use generator::{ClientError, CompletionClient, GeneratedContent, StoryGenerator};
pub use models::*;
pub use organizer::StoryOrganizer;
pub use parser::{placeholder_story, ResponseParser, PLACEHOLDER_TITLE};
pub use prompt::{build_prompt, GenerationInput, StoryLimits};

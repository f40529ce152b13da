//! Core data models for generated features and user stories

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh opaque identifier
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Priority level of a user story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Nice to have
    Low,
    /// Default priority
    #[default]
    Medium,
    /// Important
    High,
    /// Blocking
    Critical,
}

impl Priority {
    /// Resolve a free-text label such as `"High"` or `"critical - blocks release"`.
    ///
    /// Matching is case-insensitive on the first word; anything else yields `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let word = label
            .split_whitespace()
            .next()?
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();

        match word.as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user story reconstructed from model output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStory {
    /// Opaque identifier
    pub id: String,
    /// Story title, never empty
    pub title: String,
    /// Narrative description
    pub description: String,
    /// Acceptance criteria in source order
    pub acceptance_criteria: Vec<String>,
    /// Priority level
    pub priority: Priority,
    /// Estimate, if one was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
}

/// A feature grouping related stories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Opaque identifier
    pub id: String,
    /// Feature title, never empty
    pub title: String,
    /// Feature description
    pub description: String,
    /// Stories attached by the organizer; empty straight out of the parser
    pub user_stories: Vec<UserStory>,
}

/// Features and stories from one linear scan, not yet associated
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Parsed features, each with an empty story list
    pub features: Vec<Feature>,
    /// Parsed stories; at least one
    pub user_stories: Vec<UserStory>,
    /// Set when no titled story was found and the placeholder was inserted
    #[serde(default)]
    pub used_placeholder: bool,
}

/// Stories grouped under features, plus the leftovers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizedResult {
    /// Features with their matched stories
    pub features: Vec<Feature>,
    /// Stories no feature claimed
    pub standalone_stories: Vec<UserStory>,
}

impl OrganizedResult {
    /// Total stories across features and standalone
    pub fn story_count(&self) -> usize {
        self.features
            .iter()
            .map(|f| f.user_stories.len())
            .sum::<usize>()
            + self.standalone_stories.len()
    }
}

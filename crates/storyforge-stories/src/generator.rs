//! Story generation pipeline: prompt, completion, parse, organize

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use storyforge_activity_log::ActivityLogger;
use tracing::{debug, info, warn};

use crate::error::{GenerationError, Result};
use crate::models::{OrganizedResult, ParseResult};
use crate::organizer::StoryOrganizer;
use crate::parser::ResponseParser;
use crate::prompt::{build_prompt, GenerationInput, StoryLimits};

/// Error type returned by completion clients
pub type ClientError = Box<dyn std::error::Error + Send + Sync>;

/// Client for a text-completion model service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the model's full text response to `prompt`
    async fn complete(&self, model: &str, prompt: &str) -> std::result::Result<String, ClientError>;
}

/// Output of one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContent {
    /// Features and stories as parsed, unassociated
    pub parsed: ParseResult,
    /// Stories grouped under features
    pub organized: OrganizedResult,
}

/// Drives a generation run and reports progress through an [`ActivityLogger`]
pub struct StoryGenerator {
    client: Arc<dyn CompletionClient>,
    limits: StoryLimits,
}

impl StoryGenerator {
    /// Create a generator with default story limits
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            limits: StoryLimits::default(),
        }
    }

    /// Override how many stories the prompt asks for
    pub fn with_limits(mut self, limits: StoryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Current story limits
    pub fn limits(&self) -> StoryLimits {
        self.limits
    }

    /// Build the prompt, ask the model, and turn the answer into organized stories
    pub async fn generate(
        &self,
        input: &GenerationInput,
        activity: &ActivityLogger,
    ) -> Result<GeneratedContent> {
        if input.requirement.trim().is_empty() {
            return Err(GenerationError::EmptyRequirement);
        }

        info!(
            project_id = activity.project_id(),
            model = %input.model_name,
            existing = input.existing_stories.len(),
            "Generating user stories"
        );
        activity.info(
            format!("Generating user stories with {}", input.model_name),
            Some(json!({ "requirement": input.requirement, "model": input.model_name })),
        );

        let prompt = build_prompt(input, self.limits);
        activity.prompt("Sending prompt to model", Some(json!({ "prompt": prompt })));

        let started = Instant::now();
        let response = match self.client.complete(&input.model_name, &prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!(model = %input.model_name, error = %e, "Completion failed");
                activity.error(
                    "Error generating stories",
                    Some(json!({ "error": e.to_string() })),
                );
                return Err(GenerationError::Completion {
                    model: input.model_name.clone(),
                    message: e.to_string(),
                });
            }
        };
        let elapsed_ms = started.elapsed().as_millis() as u64;

        debug!(bytes = response.len(), elapsed_ms, "Received model response");
        activity.response(
            "Received response from model",
            Some(json!({ "response": response, "durationMs": elapsed_ms })),
        );

        Ok(Self::process_response(&response, activity))
    }

    /// Parse and organize a response the caller already holds
    pub fn process_response(response: &str, activity: &ActivityLogger) -> GeneratedContent {
        let parsed = ResponseParser::parse(response);
        if parsed.used_placeholder {
            warn!(
                project_id = activity.project_id(),
                "No stories found in model response; using placeholder"
            );
        }

        let organized = StoryOrganizer::organize(&parsed.user_stories, &parsed.features);

        info!(
            project_id = activity.project_id(),
            features = organized.features.len(),
            stories = organized.story_count(),
            standalone = organized.standalone_stories.len(),
            "Organized generated stories"
        );
        activity.processing(
            format!(
                "Organized {} stories into {} features",
                organized.story_count(),
                organized.features.len()
            ),
            serde_json::to_value(&organized)
                .ok()
                .map(|content| json!({ "organizedContent": content })),
        );

        GeneratedContent { parsed, organized }
    }
}

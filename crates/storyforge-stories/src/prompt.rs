//! Prompt construction for story generation
//!
//! The response template embedded in the prompt uses the same markers that
//! [`crate::parser::ResponseParser`] recognises, so the two must change together.

use serde::{Deserialize, Serialize};

use crate::models::UserStory;
use crate::parser::{
    BENEFIT_LABEL, CHECKLIST_ITEM, DESCRIPTION_LABEL, FEATURE_HEADER, PRIORITY_LABEL, ROLE_LABEL,
    STORY_HEADER, STORY_POINTS_LABEL, WANT_LABEL,
};

/// Everything needed to ask the model for stories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    /// The new requirement text
    pub requirement: String,
    /// Extracted text of the project's context documents
    pub context: String,
    /// Stories that already exist, to avoid duplicates
    pub existing_stories: Vec<UserStory>,
    /// Model to ask
    pub model_name: String,
}

impl GenerationInput {
    /// Build an input from individual context document texts
    pub fn from_context_documents<I, S>(
        requirement: impl Into<String>,
        documents: I,
        existing_stories: Vec<UserStory>,
        model_name: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let context = documents
            .into_iter()
            .map(|d| d.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n\n");

        Self {
            requirement: requirement.into(),
            context,
            existing_stories,
            model_name: model_name.into(),
        }
    }
}

/// How many stories to ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryLimits {
    /// Lower bound
    pub min: u32,
    /// Upper bound
    pub max: u32,
}

impl Default for StoryLimits {
    fn default() -> Self {
        Self { min: 2, max: 5 }
    }
}

/// Render the full instruction prompt for `input`
pub fn build_prompt(input: &GenerationInput, limits: StoryLimits) -> String {
    let context = if input.context.trim().is_empty() {
        "No context documents provided.".to_string()
    } else {
        input.context.clone()
    };

    let existing = if input.existing_stories.is_empty() {
        "No existing user stories found.".to_string()
    } else {
        input
            .existing_stories
            .iter()
            .map(|story| format!("- {}: {}", story.title, story.description))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut prompt = String::new();
    prompt.push_str(
        "You are an expert product manager and user story writer. Your task is to generate \
         well-structured user stories and features based on the given requirement.\n\n",
    );
    prompt.push_str(&format!("CONTEXT DOCUMENTS:\n{context}\n\n"));
    prompt.push_str(&format!("EXISTING USER STORIES:\n{existing}\n\n"));
    prompt.push_str(&format!("NEW REQUIREMENT:\n{}\n\n", input.requirement));
    prompt.push_str(
        "Please generate user stories and features based on this requirement. \
         Format your response as markdown with the following structure:\n\n",
    );
    prompt.push_str(&response_template());
    prompt.push_str("\nIMPORTANT GUIDELINES:\n");
    for (i, guideline) in guidelines(limits).iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, guideline));
    }
    prompt.push_str("\nGenerate the response now:");
    prompt
}

fn response_template() -> String {
    format!(
        "## Features\n\n\
         {FEATURE_HEADER} 1: [Feature Title]\n\
         {DESCRIPTION_LABEL} [Feature description]\n\n\
         ## User Stories\n\n\
         {STORY_HEADER} 1: [User Story Title]\n\
         {ROLE_LABEL} [user type]\n\
         {WANT_LABEL} [functionality]\n\
         {BENEFIT_LABEL} [benefit/value]\n\n\
         {DESCRIPTION_LABEL} [Detailed description]\n\n\
         **Acceptance Criteria:**\n\
         {CHECKLIST_ITEM} [Criteria 1]\n\
         {CHECKLIST_ITEM} [Criteria 2]\n\
         {CHECKLIST_ITEM} [Criteria 3]\n\n\
         {PRIORITY_LABEL} [Low/Medium/High/Critical]\n\
         {STORY_POINTS_LABEL} [1-13]\n\n\
         ---\n\n\
         {STORY_HEADER} 2: [User Story Title]\n\
         [Continue with same format...]\n"
    )
}

fn guidelines(limits: StoryLimits) -> Vec<String> {
    vec![
        format!(
            "Generate {}-{} user stories per requirement",
            limits.min, limits.max
        ),
        "Include relevant features that group related stories".to_string(),
        "Make stories independent and testable".to_string(),
        "Use clear, concise language".to_string(),
        "Avoid duplicating existing stories".to_string(),
        "Include realistic story point estimates".to_string(),
        "Set appropriate priorities based on business value".to_string(),
        "Each story should follow the \"As a... I want... So that...\" format".to_string(),
        "Acceptance criteria should be specific and measurable".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use crate::parser::{ResponseParser, PLACEHOLDER_TITLE};

    fn input() -> GenerationInput {
        GenerationInput {
            requirement: "Users must be able to export reports as CSV".to_string(),
            context: String::new(),
            existing_stories: vec![],
            model_name: "deepseek-r1:14b".to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_requirement_and_defaults() {
        let prompt = build_prompt(&input(), StoryLimits::default());

        assert!(prompt.contains("NEW REQUIREMENT:\nUsers must be able to export reports as CSV"));
        assert!(prompt.contains("No context documents provided."));
        assert!(prompt.contains("No existing user stories found."));
        assert!(prompt.contains("1. Generate 2-5 user stories per requirement"));
        assert!(prompt.ends_with("Generate the response now:"));
    }

    #[test]
    fn test_prompt_lists_existing_stories() {
        let mut input = input();
        input.existing_stories.push(UserStory {
            id: "1".to_string(),
            title: "Export PDF".to_string(),
            description: "As a manager I want PDFs".to_string(),
            acceptance_criteria: vec![],
            priority: Priority::Low,
            story_points: None,
        });
        input.context = "Quarterly report brief".to_string();

        let prompt = build_prompt(&input, StoryLimits { min: 1, max: 3 });

        assert!(prompt.contains("- Export PDF: As a manager I want PDFs"));
        assert!(prompt.contains("CONTEXT DOCUMENTS:\nQuarterly report brief"));
        assert!(prompt.contains("Generate 1-3 user stories"));
    }

    #[test]
    fn test_template_parses_as_a_response() {
        let result = ResponseParser::parse(&response_template());

        assert_eq!(result.features.len(), 1);
        assert_eq!(result.features[0].title, "[Feature Title]");
        assert_eq!(result.user_stories.len(), 2);
        assert_ne!(result.user_stories[0].title, PLACEHOLDER_TITLE);
        assert_eq!(result.user_stories[0].acceptance_criteria.len(), 3);
    }

    #[test]
    fn test_from_context_documents_joins_with_blank_line() {
        let input = GenerationInput::from_context_documents(
            "req",
            ["first doc", "second doc"],
            vec![],
            "model",
        );
        assert_eq!(input.context, "first doc\n\nsecond doc");
    }
}

//! Groups parsed stories under parsed features
//!
//! Matching is a keyword-overlap heuristic: a story belongs to the first feature
//! (in parse order) that shares at least one significant word with it. Significant
//! words are lowercase tokens of the feature's title and description longer than
//! [`MIN_SIGNIFICANT_LEN`] characters, and a word matches when it occurs as a
//! substring of the story's lowercase title and description. The grouping is
//! advisory; a claimed story is never reconsidered for a later feature.

use crate::models::{Feature, OrganizedResult, UserStory};

/// Tokens must be longer than this many characters to count
pub const MIN_SIGNIFICANT_LEN: usize = 3;

/// Stateless story organizer
pub struct StoryOrganizer;

impl StoryOrganizer {
    /// Partition `stories` between `features` and a standalone list.
    ///
    /// Every input story appears exactly once in the output, either under one
    /// feature or in `standalone_stories`, and relative order is kept in both.
    pub fn organize(stories: &[UserStory], features: &[Feature]) -> OrganizedResult {
        let mut pool: Vec<Option<&UserStory>> = stories.iter().map(Some).collect();

        let organized_features = features
            .iter()
            .map(|feature| {
                let keywords = significant_words(&format!(
                    "{} {}",
                    feature.title, feature.description
                ));

                let mut matched = Vec::new();
                for slot in pool.iter_mut() {
                    let is_match = slot.is_some_and(|story| overlap_score(&keywords, story) >= 1);
                    if is_match {
                        matched.extend(slot.take().cloned());
                    }
                }

                Feature {
                    id: feature.id.clone(),
                    title: feature.title.clone(),
                    description: feature.description.clone(),
                    user_stories: matched,
                }
            })
            .collect();

        let standalone_stories = pool.into_iter().flatten().cloned().collect();

        OrganizedResult {
            features: organized_features,
            standalone_stories,
        }
    }
}

/// Lowercase tokens of `text` longer than [`MIN_SIGNIFICANT_LEN`] characters.
///
/// Tokens are split on whitespace with surrounding punctuation trimmed.
pub fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|word| word.chars().count() > MIN_SIGNIFICANT_LEN)
        .collect()
}

/// How many of `keywords` occur in the story's title or description
pub fn overlap_score(keywords: &[String], story: &UserStory) -> usize {
    if keywords.is_empty() {
        return 0;
    }
    let haystack = format!("{} {}", story.title, story.description).to_lowercase();
    keywords
        .iter()
        .filter(|word| haystack.contains(word.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{generate_id, Priority};

    fn story(title: &str, description: &str) -> UserStory {
        UserStory {
            id: generate_id(),
            title: title.to_string(),
            description: description.to_string(),
            acceptance_criteria: vec!["criterion".to_string()],
            priority: Priority::High,
            story_points: Some(3),
        }
    }

    fn feature(title: &str, description: &str) -> Feature {
        Feature {
            id: generate_id(),
            title: title.to_string(),
            description: description.to_string(),
            user_stories: Vec::new(),
        }
    }

    #[test]
    fn test_significant_words_drop_short_tokens() {
        assert_eq!(
            significant_words("User Login, and SSO (single sign-on)"),
            vec!["user", "login", "single", "sign-on"]
        );
        assert!(significant_words("a to be the").is_empty());
        assert!(significant_words("").is_empty());
    }

    #[test]
    fn test_story_matched_by_shared_word() {
        let stories = vec![story("Login with email", ""), story("Export invoices", "")];
        let features = vec![feature("Login flow", "")];

        let result = StoryOrganizer::organize(&stories, &features);

        assert_eq!(result.features[0].user_stories.len(), 1);
        assert_eq!(result.features[0].user_stories[0].id, stories[0].id);
        assert_eq!(result.standalone_stories.len(), 1);
        assert_eq!(result.standalone_stories[0].id, stories[1].id);
    }

    #[test]
    fn test_match_is_substring_and_case_insensitive() {
        let stories = vec![story("REPORTS dashboard", "")];
        let features = vec![feature("Report", "")];

        let result = StoryOrganizer::organize(&stories, &features);
        assert_eq!(result.features[0].user_stories.len(), 1);
    }

    #[test]
    fn test_description_contributes_on_both_sides() {
        let stories = vec![story("Untitled", "Generates monthly invoices")];
        let features = vec![feature("Billing", "Everything about invoices")];

        let result = StoryOrganizer::organize(&stories, &features);
        assert_eq!(result.features[0].user_stories.len(), 1);
        assert!(result.standalone_stories.is_empty());
    }

    #[test]
    fn test_first_feature_wins() {
        let stories = vec![story("Search products", "")];
        let features = vec![feature("Product search", ""), feature("Search", "")];

        let result = StoryOrganizer::organize(&stories, &features);

        assert_eq!(result.features[0].user_stories.len(), 1);
        assert!(result.features[1].user_stories.is_empty());
    }

    #[test]
    fn test_short_word_feature_matches_nothing() {
        let stories = vec![story("Add an API key", "so we can go")];
        let features = vec![feature("API", "Go")];

        let result = StoryOrganizer::organize(&stories, &features);

        assert!(result.features[0].user_stories.is_empty());
        assert_eq!(result.standalone_stories.len(), 1);
    }

    #[test]
    fn test_empty_inputs() {
        let result = StoryOrganizer::organize(&[], &[]);
        assert!(result.features.is_empty());
        assert!(result.standalone_stories.is_empty());

        let stories = vec![story("Only story", "")];
        let result = StoryOrganizer::organize(&stories, &[]);
        assert_eq!(result.standalone_stories, stories);
    }

    #[test]
    fn test_order_preserved_within_feature() {
        let stories = vec![
            story("Upload avatar", ""),
            story("Unrelated", ""),
            story("Crop avatar", ""),
        ];
        let features = vec![feature("Avatar management", "")];

        let result = StoryOrganizer::organize(&stories, &features);
        let titles: Vec<_> = result.features[0]
            .user_stories
            .iter()
            .map(|s| s.title.as_str())
            .collect();

        assert_eq!(titles, vec!["Upload avatar", "Crop avatar"]);
    }

    #[test]
    fn test_copies_keep_story_fields_and_feature_identity() {
        let stories = vec![story("Login page", "details")];
        let features = vec![feature("Login", "desc")];

        let result = StoryOrganizer::organize(&stories, &features);

        assert_eq!(result.features[0].id, features[0].id);
        assert_eq!(result.features[0].description, "desc");
        assert_eq!(result.features[0].user_stories[0], stories[0]);
    }

    #[test]
    fn test_duplicate_titles_organized_independently() {
        let stories = vec![story("Login", ""), story("Login", "")];
        let features = vec![feature("Login", "")];

        let result = StoryOrganizer::organize(&stories, &features);
        assert_eq!(result.features[0].user_stories.len(), 2);
    }

    #[test]
    fn test_overlap_score_counts_keywords() {
        let keywords = significant_words("email password reset");
        assert_eq!(overlap_score(&keywords, &story("Reset password", "via email")), 3);
        assert_eq!(overlap_score(&keywords, &story("Nothing", "here")), 0);
        assert_eq!(overlap_score(&[], &story("Reset password", "")), 0);
    }
}

//! Tolerant line-oriented parser for model responses
//!
//! The model is asked to answer in a fixed markdown layout (see [`crate::prompt`]),
//! but nothing guarantees it does. Each trimmed line is matched against a set of
//! literal, case-sensitive prefixes and folded into an in-progress feature or story
//! builder; unrecognised lines are skipped. A builder becomes a record only when it
//! is flushed with a non-empty title.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{generate_id, Feature, ParseResult, Priority, UserStory};

/// Starts a feature: `### Feature 1: Title`
pub const FEATURE_HEADER: &str = "### Feature";
/// Starts a story: `### Story 1: Title`
pub const STORY_HEADER: &str = "### Story";
/// Description of the current feature or story
pub const DESCRIPTION_LABEL: &str = "**Description:**";
/// Priority of the current story
pub const PRIORITY_LABEL: &str = "**Priority:**";
/// Estimate of the current story
pub const STORY_POINTS_LABEL: &str = "**Story Points:**";
/// Acceptance criterion of the current story
pub const CHECKLIST_ITEM: &str = "- [ ]";
/// "As a ..." narrative fragment
pub const ROLE_LABEL: &str = "**As a**";
/// "I want ..." narrative fragment
pub const WANT_LABEL: &str = "**I want**";
/// "So that ..." narrative fragment
pub const BENEFIT_LABEL: &str = "**So that**";

/// Title of the story emitted when nothing could be extracted
pub const PLACEHOLDER_TITLE: &str = "Generated User Story";
const PLACEHOLDER_DESCRIPTION: &str =
    "Based on the provided requirement, implement the requested functionality.";
const PLACEHOLDER_CRITERIA: [&str; 3] = [
    "Functionality works as expected",
    "User interface is intuitive",
    "Performance meets requirements",
];
const PLACEHOLDER_POINTS: u32 = 5;

/// Byte-order mark some clients prepend to the response
const BOM: char = '\u{feff}';

static HEADER_ORDINAL: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^\d+\s*:\s*").ok());

/// One classified input line; the payload is the text after the marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Line<'a> {
    FeatureHeader(&'a str),
    StoryHeader(&'a str),
    Description(&'a str),
    Priority(&'a str),
    StoryPoints(&'a str),
    ChecklistItem(&'a str),
    Role(&'a str),
    Want(&'a str),
    Benefit(&'a str),
    Other,
}

impl<'a> Line<'a> {
    /// Classify a trimmed line. Prefixes are tried in a fixed order.
    fn classify(line: &'a str) -> Self {
        let markers: [(&str, fn(&'a str) -> Line<'a>); 9] = [
            (FEATURE_HEADER, Line::FeatureHeader),
            (STORY_HEADER, Line::StoryHeader),
            (DESCRIPTION_LABEL, Line::Description),
            (PRIORITY_LABEL, Line::Priority),
            (STORY_POINTS_LABEL, Line::StoryPoints),
            (CHECKLIST_ITEM, Line::ChecklistItem),
            (ROLE_LABEL, Line::Role),
            (WANT_LABEL, Line::Want),
            (BENEFIT_LABEL, Line::Benefit),
        ];

        markers
            .iter()
            .find_map(|(prefix, make)| line.strip_prefix(prefix).map(|rest| make(rest.trim())))
            .unwrap_or(Line::Other)
    }
}

/// Which builder description lines apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Feature,
    Story,
}

#[derive(Debug, Default)]
struct FeatureBuilder {
    title: String,
    description: Option<String>,
}

impl FeatureBuilder {
    fn new(title: String) -> Self {
        Self {
            title,
            description: None,
        }
    }

    fn build(self) -> Option<Feature> {
        if self.title.is_empty() {
            return None;
        }
        Some(Feature {
            id: generate_id(),
            title: self.title,
            description: self.description.unwrap_or_default(),
            user_stories: Vec::new(),
        })
    }
}

#[derive(Debug, Default)]
struct StoryBuilder {
    title: String,
    description: Option<String>,
    acceptance_criteria: Vec<String>,
    priority: Option<String>,
    story_points: Option<u32>,
}

impl StoryBuilder {
    fn new(title: String) -> Self {
        Self {
            title,
            ..Default::default()
        }
    }

    fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    fn build(self) -> Option<UserStory> {
        if self.title.is_empty() {
            return None;
        }
        Some(UserStory {
            id: generate_id(),
            title: self.title,
            description: self.description.unwrap_or_default(),
            acceptance_criteria: self.acceptance_criteria,
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::from_label)
                .unwrap_or_default(),
            story_points: self.story_points,
        })
    }
}

/// Parser for markdown-like model responses
pub struct ResponseParser;

impl ResponseParser {
    /// Reconstruct features and stories from a raw model response.
    ///
    /// Never fails. The returned story list always has at least one entry: when no
    /// titled story is found a fixed placeholder story is appended.
    pub fn parse(raw: &str) -> ParseResult {
        let mut features = Vec::new();
        let mut stories = Vec::new();

        let mut section = Section::None;
        let mut feature: Option<FeatureBuilder> = None;
        let mut story: Option<StoryBuilder> = None;

        for line in raw.lines() {
            match Line::classify(line.trim_matches(|c: char| c.is_whitespace() || c == BOM)) {
                Line::FeatureHeader(rest) => {
                    features.extend(feature.take().and_then(FeatureBuilder::build));
                    feature = Some(FeatureBuilder::new(strip_ordinal(rest)));
                    section = Section::Feature;
                }
                Line::StoryHeader(rest) => {
                    stories.extend(story.take().and_then(StoryBuilder::build));
                    story = Some(StoryBuilder::new(strip_ordinal(rest)));
                    section = Section::Story;
                }
                Line::Description(rest) => match section {
                    Section::Feature => {
                        if let Some(f) = feature.as_mut() {
                            f.description = Some(rest.to_string());
                        }
                    }
                    Section::Story => {
                        if let Some(s) = story.as_mut() {
                            s.description = Some(rest.to_string());
                        }
                    }
                    Section::None => {}
                },
                Line::Priority(rest) => {
                    if let Some(s) = story.as_mut() {
                        s.priority = Some(rest.to_string());
                    }
                }
                Line::StoryPoints(rest) => {
                    if let Some(s) = story.as_mut() {
                        s.story_points = parse_story_points(rest);
                    }
                }
                Line::ChecklistItem(rest) => {
                    if let Some(s) = story.as_mut() {
                        s.acceptance_criteria.push(rest.to_string());
                    }
                }
                Line::Role(rest) => {
                    if let Some(s) = story.as_mut() {
                        if !s.has_description() {
                            s.description = Some(format!("As a {rest}"));
                        }
                    }
                }
                Line::Want(rest) => {
                    if let Some(s) = story.as_mut().filter(|s| s.has_description()) {
                        if let Some(d) = s.description.as_mut() {
                            d.push_str(" I want ");
                            d.push_str(rest);
                        }
                    }
                }
                Line::Benefit(rest) => {
                    if let Some(s) = story.as_mut().filter(|s| s.has_description()) {
                        if let Some(d) = s.description.as_mut() {
                            d.push_str(" So that ");
                            d.push_str(rest);
                        }
                    }
                }
                Line::Other => {}
            }
        }

        features.extend(feature.and_then(FeatureBuilder::build));
        stories.extend(story.and_then(StoryBuilder::build));

        let used_placeholder = stories.is_empty();
        if used_placeholder {
            stories.push(placeholder_story());
        }

        ParseResult {
            features,
            user_stories: stories,
            used_placeholder,
        }
    }
}

/// The story emitted when a response yields no usable stories
pub fn placeholder_story() -> UserStory {
    UserStory {
        id: generate_id(),
        title: PLACEHOLDER_TITLE.to_string(),
        description: PLACEHOLDER_DESCRIPTION.to_string(),
        acceptance_criteria: PLACEHOLDER_CRITERIA.iter().map(|c| c.to_string()).collect(),
        priority: Priority::Medium,
        story_points: Some(PLACEHOLDER_POINTS),
    }
}

/// Remove a leading `N:` ordinal from a header remainder
fn strip_ordinal(rest: &str) -> String {
    let rest = rest.trim();
    match HEADER_ORDINAL.as_ref() {
        Some(re) => re.replace(rest, "").trim().to_string(),
        None => rest.to_string(),
    }
}

/// Leading decimal digits as a positive estimate; anything else is no value
fn parse_story_points(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok().filter(|&points| points > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESPONSE: &str = "\
## Features

### Feature 1: User Authentication
**Description:** Let people sign in securely

## User Stories

### Story 1: Login with email
**As a** registered user
**I want** to log in with my email
**So that** I can reach my dashboard

**Acceptance Criteria:**
- [ ] Valid credentials log the user in
- [ ] Invalid credentials show an error

**Priority:** High
**Story Points:** 5

---

### Story 2: Reset password
**Description:** Send a reset link by email
- [ ] Link expires after an hour
**Priority:** Critical
**Story Points:** 3
";

    #[test]
    fn test_parses_features_and_stories() {
        let result = ResponseParser::parse(FULL_RESPONSE);

        assert_eq!(result.features.len(), 1);
        assert_eq!(result.features[0].title, "User Authentication");
        assert_eq!(result.features[0].description, "Let people sign in securely");
        assert!(result.features[0].user_stories.is_empty());

        assert_eq!(result.user_stories.len(), 2);
        let login = &result.user_stories[0];
        assert_eq!(login.title, "Login with email");
        assert_eq!(
            login.description,
            "As a registered user I want to log in with my email So that I can reach my dashboard"
        );
        assert_eq!(
            login.acceptance_criteria,
            vec![
                "Valid credentials log the user in",
                "Invalid credentials show an error"
            ]
        );
        assert_eq!(login.priority, Priority::High);
        assert_eq!(login.story_points, Some(5));

        let reset = &result.user_stories[1];
        assert_eq!(reset.title, "Reset password");
        assert_eq!(reset.description, "Send a reset link by email");
        assert_eq!(reset.acceptance_criteria, vec!["Link expires after an hour"]);
        assert_eq!(reset.priority, Priority::Critical);
        assert_eq!(reset.story_points, Some(3));
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        let result = ResponseParser::parse("");

        assert!(result.features.is_empty());
        assert!(result.used_placeholder);
        assert_eq!(result.user_stories.len(), 1);
        let story = &result.user_stories[0];
        assert_eq!(story.title, PLACEHOLDER_TITLE);
        assert_eq!(story.acceptance_criteria.len(), 3);
        assert_eq!(story.priority, Priority::Medium);
        assert_eq!(story.story_points, Some(5));
    }

    #[test]
    fn test_leading_byte_order_mark_is_ignored() {
        let result = ResponseParser::parse("\u{feff}### Story 1: Bom\n**Priority:** High");

        assert!(!result.used_placeholder);
        assert_eq!(result.user_stories.len(), 1);
        assert_eq!(result.user_stories[0].title, "Bom");
        assert_eq!(result.user_stories[0].priority, Priority::High);
    }

    #[test]
    fn test_real_story_named_like_placeholder_is_not_flagged() {
        let result = ResponseParser::parse(&format!("### Story 1: {PLACEHOLDER_TITLE}"));

        assert_eq!(result.user_stories[0].title, PLACEHOLDER_TITLE);
        assert!(!result.used_placeholder);
    }

    #[test]
    fn test_features_only_still_gets_placeholder_story() {
        let result = ResponseParser::parse("### Feature 1: Reporting\n**Description:** Charts");

        assert_eq!(result.features.len(), 1);
        assert_eq!(result.user_stories.len(), 1);
        assert_eq!(result.user_stories[0].title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn test_untitled_story_is_dropped() {
        let result = ResponseParser::parse("### Story 1:\n- [ ] orphan\n### Story 2: Real one");

        assert_eq!(result.user_stories.len(), 1);
        assert_eq!(result.user_stories[0].title, "Real one");
        assert!(result.user_stories[0].acceptance_criteria.is_empty());
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let result = ResponseParser::parse("### story 1: lower\n**priority:** High");
        assert_eq!(result.user_stories[0].title, PLACEHOLDER_TITLE);
    }

    #[test]
    fn test_indented_lines_are_trimmed() {
        let result = ResponseParser::parse("   ### Story 1: Indented   \n\t- [ ]  first  ");

        assert_eq!(result.user_stories[0].title, "Indented");
        assert_eq!(result.user_stories[0].acceptance_criteria, vec!["first"]);
    }

    #[test]
    fn test_description_targets_current_section() {
        let input = "\
### Story 1: Export
**Description:** story text
### Feature 2: Data
**Description:** feature text
";
        let result = ResponseParser::parse(input);

        assert_eq!(result.user_stories[0].description, "story text");
        assert_eq!(result.features[0].description, "feature text");
    }

    #[test]
    fn test_narrative_does_not_override_description() {
        let input = "\
### Story 1: Search
**Description:** Explicit
**As a** shopper
**I want** filters
";
        let result = ResponseParser::parse(input);
        assert_eq!(result.user_stories[0].description, "Explicit I want filters");
    }

    #[test]
    fn test_want_without_role_is_ignored() {
        let input = "### Story 1: Search\n**I want** filters\n**So that** I find things";
        let result = ResponseParser::parse(input);
        assert_eq!(result.user_stories[0].description, "");
    }

    #[test]
    fn test_invalid_points_and_priority_fall_back() {
        let input = "### Story 1: Vague\n**Priority:** Someday\n**Story Points:** lots";
        let story = &ResponseParser::parse(input).user_stories[0];

        assert_eq!(story.priority, Priority::Medium);
        assert_eq!(story.story_points, None);
    }

    #[test]
    fn test_story_points_take_leading_digits() {
        assert_eq!(parse_story_points("8 points"), Some(8));
        assert_eq!(parse_story_points("13"), Some(13));
        assert_eq!(parse_story_points("0"), None);
        assert_eq!(parse_story_points("-3"), None);
        assert_eq!(parse_story_points(""), None);
    }

    #[test]
    fn test_strip_ordinal() {
        assert_eq!(strip_ordinal(" 1: Title"), "Title");
        assert_eq!(strip_ordinal(" 12 :  Spaced"), "Spaced");
        assert_eq!(strip_ordinal(": No ordinal"), ": No ordinal");
        assert_eq!(strip_ordinal(" Plain"), "Plain");
        assert_eq!(strip_ordinal(" 3:"), "");
    }

    #[test]
    fn test_labels_before_any_story_are_ignored() {
        let input = "**Priority:** High\n- [ ] stray\n**As a** ghost\n### Story 1: First";
        let story = &ResponseParser::parse(input).user_stories[0];

        assert_eq!(story.title, "First");
        assert_eq!(story.priority, Priority::Medium);
        assert!(story.acceptance_criteria.is_empty());
        assert_eq!(story.description, "");
    }

    #[test]
    fn test_records_get_distinct_ids() {
        let result = ResponseParser::parse("### Story 1: A\n### Story 2: A");
        assert_ne!(result.user_stories[0].id, result.user_stories[1].id);
    }
}

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::tag::{Tag, TagNames};
use crate::error::ValidationErrors;

/// Longest title accepted, counted in characters.
pub const MAX_TITLE_CHARS: usize = 255;

/// Post entity - represents a blog post owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post owned by `user_id`.
    pub fn new(user_id: Uuid, input: PostInput) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: input.title,
            content: input.content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite title and content. The owner never changes.
    pub fn revise(&mut self, input: PostInput) {
        self.title = input.title;
        self.content = input.content;
        self.updated_at = timestamp();
    }
}

/// A post together with every tag linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithTags {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<Tag>,
}

impl PostWithTags {
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Validated title and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    title: String,
    content: String,
}

impl PostInput {
    pub fn new(title: String, content: String) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_title(&title, &mut errors);
        check_content(&content, &mut errors);
        errors.into_result()?;
        Ok(Self { title, content })
    }

    #[cfg(test)]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Unvalidated post fields as received from a client.
///
/// `tags: None` means the field was absent, which is different from an
/// explicitly empty list.
#[derive(Debug, Clone, Default)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// The result of validating a [`PostDraft`].
#[derive(Debug, Clone)]
pub struct ValidatedPost {
    pub input: PostInput,
    pub tags: Option<TagNames>,
}

impl PostDraft {
    pub fn validate(self) -> Result<ValidatedPost, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required("title", self.title, &mut errors);
        let content = required("content", self.content, &mut errors);

        let input = match (title, content) {
            (Some(title), Some(content)) => match PostInput::new(title, content) {
                Ok(input) => Some(input),
                Err(field_errors) => {
                    errors.merge(field_errors);
                    None
                }
            },
            // report the supplied field too, not only the missing one
            (title, content) => {
                if let Some(title) = &title {
                    check_title(title, &mut errors);
                }
                if let Some(content) = &content {
                    check_content(content, &mut errors);
                }
                None
            }
        };

        let tags = match self.tags.map(TagNames::parse).transpose() {
            Ok(tags) => tags,
            Err(tag_errors) => {
                errors.merge(tag_errors);
                None
            }
        };

        match input {
            Some(input) if errors.is_empty() => Ok(ValidatedPost { input, tags }),
            _ => Err(errors),
        }
    }
}

fn required(field: &str, value: Option<String>, errors: &mut ValidationErrors) -> Option<String> {
    if value.is_none() {
        errors.add(field, format!("The {} field is required.", field));
    }
    value
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if title.trim().is_empty() {
        errors.add("title", "The title field is required.");
    } else if title.chars().count() > MAX_TITLE_CHARS {
        errors.add(
            "title",
            format!(
                "The title field must not be greater than {} characters.",
                MAX_TITLE_CHARS
            ),
        );
    }
}

fn check_content(content: &str, errors: &mut ValidationErrors) {
    if content.trim().is_empty() {
        errors.add("content", "The content field is required.");
    }
}

/// Current time at the microsecond precision every backend can store.
fn timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;

/// Longest tag name accepted, counted in characters.
pub const MAX_TAG_NAME_CHARS: usize = 255;

/// Tag entity - a globally shared label, unique by exact name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}

/// A validated, duplicate-free list of tag names in request order.
///
/// Names are compared exactly: no trimming, no case folding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNames(Vec<String>);

impl TagNames {
    pub fn parse(names: Vec<String>) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut unique: Vec<String> = Vec::with_capacity(names.len());

        for (index, name) in names.into_iter().enumerate() {
            let field = format!("tags.{}", index);
            if name.is_empty() {
                errors.add(field, "The tag name may not be empty.");
            } else if name.chars().count() > MAX_TAG_NAME_CHARS {
                errors.add(
                    field,
                    format!(
                        "The tag name must not be greater than {} characters.",
                        MAX_TAG_NAME_CHARS
                    ),
                );
            } else if !unique.contains(&name) {
                unique.push(name);
            }
        }

        errors.into_result()?;
        Ok(Self(unique))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

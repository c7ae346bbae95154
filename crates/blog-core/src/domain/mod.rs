//! Domain entities - the core business objects.

mod locale;
mod post;
mod tag;

pub use locale::{Locale, select_locale};
pub use post::{MAX_TITLE_CHARS, Post, PostDraft, PostInput, PostWithTags, ValidatedPost};
pub use tag::{MAX_TAG_NAME_CHARS, Tag, TagNames};

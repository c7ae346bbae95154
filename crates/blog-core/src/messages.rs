//! Localized response messages.

use crate::domain::Locale;

/// Keys for the `message` field of successful responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    PostListed,
    PostShowed,
    PostCreated,
    PostUpdated,
    PostDeleted,
}

impl MessageKey {
    pub fn key(self) -> &'static str {
        match self {
            MessageKey::PostListed => "post_listed",
            MessageKey::PostShowed => "post_showed",
            MessageKey::PostCreated => "post_created",
            MessageKey::PostUpdated => "post_updated",
            MessageKey::PostDeleted => "post_deleted",
        }
    }

    pub fn translate(self, locale: Locale) -> &'static str {
        match (locale, self) {
            (Locale::En, MessageKey::PostListed) => "Posts retrieved successfully",
            (Locale::En, MessageKey::PostShowed) => "Post retrieved successfully",
            (Locale::En, MessageKey::PostCreated) => "Post created successfully",
            (Locale::En, MessageKey::PostUpdated) => "Post updated successfully",
            (Locale::En, MessageKey::PostDeleted) => "Post deleted successfully",
            (Locale::It, MessageKey::PostListed) => "Post recuperati con successo",
            (Locale::It, MessageKey::PostShowed) => "Post recuperato con successo",
            (Locale::It, MessageKey::PostCreated) => "Post creato con successo",
            (Locale::It, MessageKey::PostUpdated) => "Post aggiornato con successo",
            (Locale::It, MessageKey::PostDeleted) => "Post eliminato con successo",
        }
    }
}

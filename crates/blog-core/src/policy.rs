//! Ownership policy for mutating posts.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;

/// Only the owner of a post may update or delete it.
pub fn can_mutate(requester_id: Uuid, post: &Post) -> bool {
    requester_id == post.user_id
}

/// [`can_mutate`] as a `Result`, for use with `?`.
pub fn authorize_mutation(requester_id: Uuid, post: &Post) -> Result<(), DomainError> {
    if can_mutate(requester_id, post) {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

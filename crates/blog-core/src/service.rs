//! Post use cases: validation, ownership checks and repository calls.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostDraft, PostWithTags, Tag};
use crate::error::{DomainError, RepoError};
use crate::policy;
use crate::ports::{PostRepository, TagRepository};

/// Orchestrates the post and tag stores on behalf of a requester.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, tags: Arc<dyn TagRepository>) -> Self {
        Self { posts, tags }
    }

    /// Newest first. An empty filter is treated as no filter.
    pub async fn list(&self, tag: Option<&str>) -> Result<Vec<PostWithTags>, DomainError> {
        let tag = tag.filter(|t| !t.is_empty());
        Ok(self.posts.list(tag).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<PostWithTags, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity_type: "post",
                id,
            })
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        draft: PostDraft,
    ) -> Result<PostWithTags, DomainError> {
        let validated = draft.validate()?;
        let post = Post::new(owner_id, validated.input);
        Ok(self.posts.create(post, validated.tags.as_ref()).await?)
    }

    /// Checks run in order: existence, ownership, payload.
    pub async fn update(
        &self,
        requester_id: Uuid,
        id: Uuid,
        draft: PostDraft,
    ) -> Result<PostWithTags, DomainError> {
        let current = self.get(id).await?;
        policy::authorize_mutation(requester_id, &current.post)?;

        let validated = draft.validate()?;
        self.posts
            .update(id, validated.input, validated.tags.as_ref())
            .await
            .map_err(|e| missing_post(e, id))
    }

    pub async fn delete(&self, requester_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        let current = self.get(id).await?;
        policy::authorize_mutation(requester_id, &current.post)?;

        self.posts.delete(id).await.map_err(|e| missing_post(e, id))
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        Ok(self.tags.list_all().await?)
    }
}

/// A post deleted between the lookup and the write is still a 404.
fn missing_post(err: RepoError, id: Uuid) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound {
            entity_type: "post",
            id,
        },
        other => other.into(),
    }
}

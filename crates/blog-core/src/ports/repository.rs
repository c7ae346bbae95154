use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostInput, PostWithTags, Tag, TagNames};
use crate::error::RepoError;

/// Tag store: get-or-create by exact name.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Return the tag called `name`, creating it first if needed.
    ///
    /// Calling this repeatedly, or concurrently, with the same name yields
    /// the same tag and never a duplicate row.
    async fn ensure_tag(&self, name: &str) -> Result<Tag, RepoError>;

    /// Every tag, ordered by name.
    async fn list_all(&self) -> Result<Vec<Tag>, RepoError>;
}

/// Post repository. Every mutating method is all-or-nothing.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and attach `tags` when given.
    async fn create(&self, post: Post, tags: Option<&TagNames>) -> Result<PostWithTags, RepoError>;

    /// Newest first; `tag` restricts to posts carrying that exact tag name.
    async fn list(&self, tag: Option<&str>) -> Result<Vec<PostWithTags>, RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithTags>, RepoError>;

    /// Overwrite title and content, and synchronize tags when given.
    /// Fails with [`RepoError::NotFound`] if the post is absent.
    async fn update(
        &self,
        id: Uuid,
        input: PostInput,
        tags: Option<&TagNames>,
    ) -> Result<PostWithTags, RepoError>;

    /// Remove the post and its tag links.
    /// Fails with [`RepoError::NotFound`] if the post is absent.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
}

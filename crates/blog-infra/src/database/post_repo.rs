//! SQL post repository. Mutations run in a single transaction so a failure
//! part-way (e.g. during tag synchronization) leaves no partial state behind.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Post, PostInput, PostWithTags, TagNames};
use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use super::associations::{attach, synchronize, tags_for_posts, tags_of};
use super::entity::{post, post_tag, tag};
use super::repo_err;

/// SQL-backed [`PostRepository`].
pub struct SqlPostRepository {
    db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn create(&self, post: Post, tags: Option<&TagNames>) -> Result<PostWithTags, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let model = post::ActiveModel::from(post)
            .insert(&txn)
            .await
            .map_err(repo_err)?;
        if let Some(names) = tags {
            attach(&txn, model.id, names).await?;
        }
        let tags = tags_of(&txn, model.id).await?;

        txn.commit().await.map_err(repo_err)?;
        tracing::debug!(post_id = %model.id, "Inserted post");

        Ok(PostWithTags {
            post: model.into(),
            tags,
        })
    }

    async fn list(&self, tag: Option<&str>) -> Result<Vec<PostWithTags>, RepoError> {
        let mut query = post::Entity::find()
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id);
        if let Some(name) = tag {
            // name is unique and each pair appears once, so no duplicate rows
            query = query
                .inner_join(tag::Entity)
                .filter(tag::Column::Name.eq(name));
        }

        let posts = query.all(&self.db).await.map_err(repo_err)?;
        let ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
        let mut tags = tags_for_posts(&self.db, &ids).await?;

        tracing::debug!(count = posts.len(), filter = ?tag, "Listed posts");
        Ok(posts
            .into_iter()
            .map(|model| PostWithTags {
                tags: tags.remove(&model.id).unwrap_or_default(),
                post: model.into(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostWithTags>, RepoError> {
        let Some(model) = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(repo_err)?
        else {
            return Ok(None);
        };

        let tags = tags_of(&self.db, id).await?;
        Ok(Some(PostWithTags {
            post: model.into(),
            tags,
        }))
    }

    async fn update(
        &self,
        id: Uuid,
        input: PostInput,
        tags: Option<&TagNames>,
    ) -> Result<PostWithTags, RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let model = post::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(repo_err)?
            .ok_or(RepoError::NotFound)?;

        let mut revised = Post::from(model.clone());
        revised.revise(input);

        // user_id stays Unchanged: ownership is fixed at creation
        let mut active = model.into_active_model();
        active.title = Set(revised.title);
        active.content = Set(revised.content);
        active.updated_at = Set(revised.updated_at.into());
        let model = active.update(&txn).await.map_err(repo_err)?;

        if let Some(names) = tags {
            synchronize(&txn, id, names).await?;
        }
        let tags = tags_of(&txn, id).await?;

        txn.commit().await.map_err(repo_err)?;
        tracing::debug!(post_id = %id, "Updated post");

        Ok(PostWithTags {
            post: model.into(),
            tags,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(repo_err)?;

        let unlinked = post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(id))
            .exec(&txn)
            .await
            .map_err(repo_err)?
            .rows_affected;

        let result = post::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(repo_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(repo_err)?;
        tracing::debug!(post_id = %id, unlinked, "Deleted post");
        Ok(())
    }
}

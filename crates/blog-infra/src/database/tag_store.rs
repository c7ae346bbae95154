//! Tag store: get-or-create keyed on the unique tag name.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbConn, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use blog_core::domain::Tag;
use blog_core::error::RepoError;
use blog_core::ports::TagRepository;

use super::entity::tag;
use super::repo_err;

/// SQL-backed [`TagRepository`].
pub struct SqlTagRepository {
    db: DbConn,
}

impl SqlTagRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TagRepository for SqlTagRepository {
    async fn ensure_tag(&self, name: &str) -> Result<Tag, RepoError> {
        ensure_tag(&self.db, name).await.map(Into::into)
    }

    async fn list_all(&self) -> Result<Vec<Tag>, RepoError> {
        let tags = tag::Entity::find()
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(tags.into_iter().map(Into::into).collect())
    }
}

/// Look the tag up by exact name, inserting it if absent.
///
/// The insert ignores a conflicting row, so a concurrent caller that created
/// the same name first is picked up by the second lookup instead of failing.
pub(crate) async fn ensure_tag<C>(conn: &C, name: &str) -> Result<tag::Model, RepoError>
where
    C: ConnectionTrait,
{
    if let Some(existing) = find_by_name(conn, name).await? {
        return Ok(existing);
    }

    let candidate = tag::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_owned()),
    };
    let inserted = tag::Entity::insert(candidate)
        .on_conflict(OnConflict::column(tag::Column::Name).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await;

    match inserted {
        Ok(0) | Err(DbErr::RecordNotInserted) => {
            tracing::debug!(tag = %name, "Tag created concurrently, reusing it");
        }
        Ok(_) => tracing::debug!(tag = %name, "Tag created"),
        Err(e) => return Err(repo_err(e)),
    }

    find_by_name(conn, name)
        .await?
        .ok_or_else(|| RepoError::Query(format!("tag '{}' missing after insert", name)))
}

async fn find_by_name<C>(conn: &C, name: &str) -> Result<Option<tag::Model>, RepoError>
where
    C: ConnectionTrait,
{
    tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(repo_err)
}

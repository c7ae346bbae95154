//! Post ↔ tag links: additive attach and replacing synchronize.
//!
//! These run on the caller's connection, so the post repository composes
//! them into its own transaction.

use std::collections::HashMap;

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use blog_core::domain::{Tag, TagNames};
use blog_core::error::RepoError;

use super::entity::{post_tag, tag};
use super::repo_err;
use super::tag_store::ensure_tag;

/// Ensure every named tag and link it to the post. Existing links stay.
pub(crate) async fn attach<C>(conn: &C, post_id: Uuid, names: &TagNames) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    for name in names.iter() {
        let tag = ensure_tag(conn, name).await?;
        link(conn, post_id, tag.id).await?;
    }

    tracing::debug!(%post_id, count = names.len(), "Attached tags");
    Ok(())
}

/// Ensure every named tag, then make the post's links exactly that set.
///
/// Links outside the set are removed, missing ones added, and links already
/// present are left as they are.
pub(crate) async fn synchronize<C>(
    conn: &C,
    post_id: Uuid,
    names: &TagNames,
) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let mut wanted = Vec::with_capacity(names.len());
    for name in names.iter() {
        wanted.push(ensure_tag(conn, name).await?.id);
    }

    let mut stale = post_tag::Entity::delete_many().filter(post_tag::Column::PostId.eq(post_id));
    if !wanted.is_empty() {
        stale = stale.filter(post_tag::Column::TagId.is_not_in(wanted.iter().copied()));
    }
    let removed = stale.exec(conn).await.map_err(repo_err)?.rows_affected;

    for tag_id in &wanted {
        link(conn, post_id, *tag_id).await?;
    }

    tracing::debug!(%post_id, kept = wanted.len(), removed, "Synchronized tags");
    Ok(())
}

async fn link<C>(conn: &C, post_id: Uuid, tag_id: Uuid) -> Result<(), RepoError>
where
    C: ConnectionTrait,
{
    let row = post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(tag_id),
    };
    let inserted = post_tag::Entity::insert(row)
        .on_conflict(
            OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await;

    match inserted {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
        Err(e) => Err(repo_err(e)),
    }
}

/// Tags of one post, ordered by name.
pub(crate) async fn tags_of<C>(conn: &C, post_id: Uuid) -> Result<Vec<Tag>, RepoError>
where
    C: ConnectionTrait,
{
    let mut grouped = tags_for_posts(conn, &[post_id]).await?;
    Ok(grouped.remove(&post_id).unwrap_or_default())
}

/// Tags of many posts in one query, grouped by post and ordered by name.
pub(crate) async fn tags_for_posts<C>(
    conn: &C,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Tag>>, RepoError>
where
    C: ConnectionTrait,
{
    let mut grouped: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = post_tag::Entity::find()
        .filter(post_tag::Column::PostId.is_in(post_ids.iter().copied()))
        .find_also_related(tag::Entity)
        .all(conn)
        .await
        .map_err(repo_err)?;

    for (link, tag) in rows {
        if let Some(tag) = tag {
            grouped.entry(link.post_id).or_default().push(tag.into());
        }
    }
    for tags in grouped.values_mut() {
        tags.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Ok(grouped)
}

//! Table creation from the entity definitions.
//!
//! Versioned migrations are owned by the deployment; this bootstraps an empty
//! database (local runs, tests) with the same constraints.

use sea_orm::{ConnectionTrait, DbErr, EntityName, EntityTrait, Schema};

use super::entity::{post, post_tag, tag};

/// Create `posts`, `tags` and `post_tag` if they do not exist yet.
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, post::Entity).await?;
    create_table(db, tag::Entity).await?;
    // join table last: it references both
    create_table(db, post_tag::Entity).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let mut statement = Schema::new(backend).create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = %entity.table_name(), "Ensured table exists");
    Ok(())
}

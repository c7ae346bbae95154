//! Relational storage via SeaORM.

mod associations;
mod connections;
mod post_repo;
mod schema;
mod tag_store;

pub mod entity;

pub use connections::{DatabaseConfig, backend_name, connect};
pub use post_repo::SqlPostRepository;
pub use schema::create_schema;
pub use tag_store::SqlTagRepository;

pub use sea_orm::DbConn;

use blog_core::error::RepoError;
use sea_orm::{DbErr, SqlErr};

/// Map a SeaORM error onto the repository error taxonomy.
pub(crate) fn repo_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => RepoError::Constraint(msg),
        _ => match err {
            DbErr::Conn(e) => RepoError::Connection(e.to_string()),
            other => RepoError::Query(other.to_string()),
        },
    }
}

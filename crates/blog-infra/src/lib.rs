//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `database` - SeaORM entities and repositories
//! - `postgres` - PostgreSQL driver
//! - `sqlite` - SQLite driver
//! - `auth` - JWT token verification

pub mod memory;

#[cfg(feature = "database")]
pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use memory::InMemoryStore;

#[cfg(feature = "database")]
pub use database::{DatabaseConfig, SqlPostRepository, SqlTagRepository};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};

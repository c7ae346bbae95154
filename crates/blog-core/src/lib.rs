//! # Blog Core
//!
//! The domain layer of the blog API: posts, tags, ownership policy and
//! locale selection. This crate contains pure business logic with zero
//! infrastructure dependencies; storage is reached through the traits in
//! [`ports`].

pub mod domain;
pub mod error;
pub mod messages;
pub mod policy;
pub mod ports;
pub mod service;

pub use error::{DomainError, RepoError, ValidationErrors};
pub use service::PostService;

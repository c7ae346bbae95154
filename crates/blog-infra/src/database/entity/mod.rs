//! SeaORM entities.

pub mod post;
pub mod post_tag;
pub mod tag;

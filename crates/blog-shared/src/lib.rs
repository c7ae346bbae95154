//! # Blog Shared
//!
//! Wire types shared by the API server and its clients.
//! This crate has no knowledge of the domain layer; the server converts
//! domain values into these shapes at the edge.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;

//! # Bloglist Infrastructure
//!
//! Concrete implementations of the ports defined in `bloglist-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL record store via SeaORM
//! - `minimal` - No external dependencies, in-memory only

pub mod database;

pub use database::InMemoryBlogRepository;

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresBlogRepository};

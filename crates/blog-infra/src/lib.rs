//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the database, in-memory and mail integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `mail-webhook` - Mail delivery through an HTTP relay

pub mod database;
pub mod mail;
pub mod memory;

// Re-exports - In-Memory
pub use mail::{ConsoleMailSender, InMemoryMailSender};
pub use memory::InMemoryBlogStore;

pub use database::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use database::{
    DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

#[cfg(feature = "mail-webhook")]
pub use mail::WebhookMailSender;

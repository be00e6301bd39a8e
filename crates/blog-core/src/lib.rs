//! # Blog Core
//!
//! The domain layer of the blog backend.
//! This crate contains the publication and moderation rules, form validation,
//! pagination and the service operations, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod forms;
pub mod pagination;
pub mod ports;
pub mod query;
pub mod services;

pub use error::DomainError;
pub use services::{BlogService, BlogSettings};

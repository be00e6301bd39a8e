//! Application services - the operations exposed to the HTTP layer.

mod blog;

pub use blog::{BlogService, BlogSettings, PostDetail, PostListing, ShareOutcome};

//! Blog Module
//!
//! Practitioner-authored posts: the `BlogStore` and the create handler.
//! Listing and rendering posts is the frontend's business.

pub mod handlers;
pub mod store;

pub use handlers::{create_post, CreatePostRequest, CreatePostResponse, TagsInput};
pub use store::{BlogPost, BlogStore, InMemoryBlogStore, NewPost, PgBlogStore};

/**
 * Blog Handlers
 *
 * POST /api/blog/create, guarded for practitioners. The author name and the
 * publication date are decided by the server; any `author` or `date` the
 * client sends is ignored.
 */

use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::backend::auth::handlers::types::required;
use crate::backend::blog::store::{BlogPost, NewPost};
use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::AppState;

/// Tags as a JSON array or a comma-separated string
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TagsInput {
    List(Vec<String>),
    Text(String),
}

impl TagsInput {
    /// Trimmed, non-empty tags in input order
    pub fn normalize(self) -> Vec<String> {
        let raw: Vec<String> = match self {
            Self::List(tags) => tags,
            Self::Text(text) => text.split(',').map(str::to_string).collect(),
        };

        raw.iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Option<TagsInput>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreatePostResponse {
    pub message: String,
    pub post: BlogPost,
}

/// Create a blog post
///
/// # Errors
///
/// * `400 Bad Request` - blank title, excerpt or content
/// * `401`/`403` - raised by the guard in front of this route
/// * `404 Not Found` - the token's subject no longer exists
/// * `500 Internal Server Error` - store failure
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePostResponse>), BackendError> {
    let Json(request) = payload?;

    let title = required("title", &request.title)?.to_string();
    let excerpt = required("excerpt", &request.excerpt)?.to_string();
    let content = required("content", &request.content)?.to_string();
    let tags = request.tags.map(TagsInput::normalize).unwrap_or_default();

    let author = state
        .users
        .find_by_id(principal.subject_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Post author {} not found", principal.subject_id);
            BackendError::NotFound("User")
        })?;

    let post = state
        .posts
        .create(NewPost {
            title,
            excerpt,
            content,
            tags,
            author: author.name,
            author_id: author.id,
        })
        .await?;

    tracing::info!("Blog post {} created by {}", post.id, post.author_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatePostResponse {
            message: "Blog post created".to_string(),
            post,
        }),
    ))
}

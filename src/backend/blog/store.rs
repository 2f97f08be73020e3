/**
 * Blog Post Store
 *
 * Practitioners publish posts; this module holds the post record and the
 * `BlogStore` trait with PostgreSQL and in-memory implementations.
 */

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::auth::users::{bounded, StoreError};

/// A published blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Display name of the author at publication time
    pub author: String,
    pub author_id: Uuid,
    /// UTC date of publication
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Input for [`BlogStore::create`]
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub tags: Vec<String>,
    pub author: String,
    pub author_id: Uuid,
}

impl NewPost {
    fn into_post(self, now: DateTime<Utc>) -> BlogPost {
        BlogPost {
            id: Uuid::new_v4(),
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            tags: self.tags,
            author: self.author,
            author_id: self.author_id,
            date: now.date_naive(),
            created_at: now,
        }
    }
}

#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Persist a new post, assigning id, date and creation time
    async fn create(&self, post: NewPost) -> Result<BlogPost, StoreError>;

    /// Posts by one author, newest first
    ///
    /// No route serves listings; this is for inspecting what `create` stored.
    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<BlogPost>, StoreError>;
}

/// PostgreSQL-backed blog store
#[derive(Clone)]
pub struct PgBlogStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgBlogStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn create(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let post = post.into_post(Utc::now());

        bounded(
            self.timeout,
            sqlx::query_as::<_, BlogPost>(
                r#"
                INSERT INTO blog_posts (id, title, excerpt, content, tags, author, author_id, date, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING id, title, excerpt, content, tags, author, author_id, date, created_at
                "#,
            )
            .bind(post.id)
            .bind(&post.title)
            .bind(&post.excerpt)
            .bind(&post.content)
            .bind(&post.tags)
            .bind(&post.author)
            .bind(post.author_id)
            .bind(post.date)
            .bind(post.created_at)
            .fetch_one(&self.pool),
        )
        .await
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<BlogPost>, StoreError> {
        bounded(
            self.timeout,
            sqlx::query_as::<_, BlogPost>(
                r#"
                SELECT id, title, excerpt, content, tags, author, author_id, date, created_at
                FROM blog_posts
                WHERE author_id = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(author_id)
            .fetch_all(&self.pool),
        )
        .await
    }
}

/// In-memory blog store
#[derive(Default)]
pub struct InMemoryBlogStore {
    posts: RwLock<Vec<BlogPost>>,
}

impl InMemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogStore for InMemoryBlogStore {
    async fn create(&self, post: NewPost) -> Result<BlogPost, StoreError> {
        let post = post.into_post(Utc::now());
        self.posts.write().await.push(post.clone());
        Ok(post)
    }

    async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<BlogPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .rev()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect())
    }
}

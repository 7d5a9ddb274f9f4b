use crate::record::PostRecord;
use crate::{PostStore, Result};
use async_trait::async_trait;
use mural_common::model::{
    Id, ModelValidationError,
    post::{CreatePost, PageCursor, Post},
};
use sqlx::PgPool;
use time::OffsetDateTime;

/// Client for the hosted Postgres row store.
pub struct PostStoreClient {
    pool: PgPool,
}

impl PostStoreClient {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostStoreClient {
    async fn insert_post(&self, post: &CreatePost) -> Result<Post> {
        let record = sqlx::query_as::<_, PostRecord>(
            "
            INSERT INTO posts (body, image_url, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, body, image_url, created_at, user_id
            ",
        )
        .bind(post.body.get())
        .bind(post.image_url.as_deref())
        .bind(post.user_id.map(Id::get))
        .fetch_one(&self.pool)
        .await?;

        let post = Post::try_from(record)?;
        Ok(post)
    }

    async fn select_page(&self, limit: u32, before: Option<PageCursor>) -> Result<Vec<Post>> {
        let records = match before {
            Some(cursor) => {
                sqlx::query_as::<_, PostRecord>(
                    "
                    SELECT id, body, image_url, created_at, user_id
                    FROM posts
                    WHERE (created_at, id) < ($1, $2)
                    ORDER BY created_at DESC, id DESC
                    LIMIT $3
                    ",
                )
                .bind(OffsetDateTime::from(cursor.created_at))
                .bind(cursor.id.get())
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PostRecord>(
                    "
                    SELECT id, body, image_url, created_at, user_id
                    FROM posts
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    ",
                )
                .bind(i64::from(limit))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let posts = records
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<Vec<Post>, ModelValidationError>>()?;
        Ok(posts)
    }
}

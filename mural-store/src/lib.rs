pub mod blob;
pub mod client;
mod record;

use async_trait::async_trait;
use mural_common::model::{
    ModelValidationError,
    post::{CreatePost, PageCursor, Post},
};
use thiserror::Error;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("An object in the store was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error(transparent)]
    Table(#[from] sqlx::Error),
    #[error(transparent)]
    Blob(#[from] aws_sdk_s3::Error),
}

/// The hosted row store holding the `posts` table.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Inserts a post; the store assigns `id` and `created_at` and returns
    /// the stored row.
    async fn insert_post(&self, post: &CreatePost) -> Result<Post>;

    /// Fetches up to `limit` posts ordered by `(created_at, id)` descending,
    /// strictly older than `before` when a cursor is given.
    async fn select_page(&self, limit: u32, before: Option<PageCursor>) -> Result<Vec<Post>>;
}

/// The hosted object store holding uploaded wall images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn upload(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<()>;

    /// Publicly retrievable URL for a stored blob. A pure key-to-URL mapping,
    /// no request is made.
    fn public_url(&self, key: &str) -> String;
}

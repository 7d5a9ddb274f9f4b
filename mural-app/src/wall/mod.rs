use crate::wall::{
    composer::{Composer, SubmitError},
    feed::Feed,
};
use mural_common::model::post::Post;
use mural_store::{BlobStore, PostStore, StoreError};
use std::sync::Arc;
use tracing::warn;

pub mod composer;
pub mod feed;

#[cfg(test)]
pub(crate) mod testing;

/// Top-level state of the wall page: the feed of loaded posts and the draft
/// being composed. All mutation goes through the operations below; the two
/// hosted stores are only ever reached from here.
pub struct Wall {
    posts: Arc<dyn PostStore>,
    blobs: Arc<dyn BlobStore>,
    pub feed: Feed,
    pub composer: Composer,
}

impl Wall {
    #[must_use]
    pub fn new(posts: Arc<dyn PostStore>, blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            posts,
            blobs,
            feed: Feed::new(),
            composer: Composer::new(),
        }
    }

    /// Reloads the first feed page, discarding previously loaded pages.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        self.feed.load_initial(self.posts.as_ref()).await
    }

    /// Loads the next (older) feed page, if any.
    pub async fn load_more(&mut self) -> Result<(), StoreError> {
        self.feed.load_more(self.posts.as_ref()).await
    }

    /// Submits the current draft, then reloads the feed so the new post shows
    /// first. When only the reload fails the post still went through; the
    /// stale feed is kept and the failure logged.
    pub async fn share(&mut self) -> Result<Post, SubmitError> {
        let post = self
            .composer
            .submit(self.posts.as_ref(), self.blobs.as_ref())
            .await?;

        if let Err(error) = self.feed.load_initial(self.posts.as_ref()).await {
            warn!(%error, "Feed reload after sharing failed");
        }

        Ok(post)
    }
}

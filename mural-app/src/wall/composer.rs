use mural_common::model::post::{
    CreatePost, InvalidPostBodyError, POST_BODY_MAX_LEN, Post, PostBody,
};
use mural_common::model::image::ImageUpload;
use mural_store::{BlobStore, PostStore, StoreError};
use thiserror::Error;
use time::UtcDateTime;

/// The in-progress draft: text plus an optional image, gated by a busy flag
/// while a submission is in flight.
#[derive(Default)]
pub struct Composer {
    text: String,
    image: Option<ImageUpload>,
    busy: bool,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Write something or attach a photo first")]
    EmptyDraft,
    #[error("A share is already in flight")]
    InFlight,
    #[error(transparent)]
    Body(#[from] InvalidPostBodyError),
    #[error("Failed to upload the photo: {0}")]
    Upload(#[source] StoreError),
    #[error("Failed to share the post: {0}")]
    Insert(#[source] StoreError),
}

impl Composer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    /// Characters left before the body limit.
    #[must_use]
    pub fn remaining_chars(&self) -> usize {
        POST_BODY_MAX_LEN.saturating_sub(self.text.chars().count())
    }

    /// Replaces the draft text; text over the body limit is rejected and the
    /// previous draft kept.
    pub fn set_text(&mut self, text: String) -> Result<(), InvalidPostBodyError> {
        self.text = PostBody::new(text)?.into_inner();
        Ok(())
    }

    pub fn attach(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    pub fn detach(&mut self) -> Option<ImageUpload> {
        self.image.take()
    }

    /// Uploads the attached image (if any), then inserts the post row. The
    /// draft is cleared only when the whole submission went through, so a
    /// failed attempt can be retried as-is. An image already uploaded when
    /// the insert fails is left behind in the blob store.
    pub async fn submit(
        &mut self,
        posts: &dyn PostStore,
        blobs: &dyn BlobStore,
    ) -> Result<Post, SubmitError> {
        if self.busy {
            return Err(SubmitError::InFlight);
        }

        let trimmed = self.text.trim();
        if trimmed.is_empty() && self.image.is_none() {
            return Err(SubmitError::EmptyDraft);
        }
        let body = PostBody::new(trimmed.to_owned())?;

        self.busy = true;

        let image_url = match &self.image {
            Some(image) => {
                let key = object_key(UtcDateTime::now(), image.file_name());
                let uploaded = blobs.upload(&key, image.kind().mime(), image.bytes()).await;
                if let Err(error) = uploaded {
                    self.busy = false;
                    return Err(SubmitError::Upload(error));
                }
                Some(blobs.public_url(&key))
            }
            None => None,
        };

        let create = CreatePost {
            body,
            image_url,
            user_id: None,
        };

        match posts.insert_post(&create).await {
            Ok(post) => {
                self.text.clear();
                self.image = None;
                self.busy = false;
                Ok(post)
            }
            Err(error) => {
                self.busy = false;
                Err(SubmitError::Insert(error))
            }
        }
    }
}

/// Object key for an upload: the millisecond timestamp makes the key unique
/// per submission, the file name is kept as-is.
#[must_use]
pub fn object_key(now: UtcDateTime, file_name: &str) -> String {
    let millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("wall/{millis}_{file_name}")
}

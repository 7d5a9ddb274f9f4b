use crate::{BlobStore, Result};
use async_trait::async_trait;
use aws_sdk_s3::{Client, primitives::ByteStream};

/// Client for the hosted S3-compatible object store.
///
/// The bucket is expected to allow anonymous reads; public URLs are the
/// configured base URL joined with the object key.
pub struct BlobStoreClient {
    client: Client,
    bucket: String,
    public_base_url: String,
}

impl BlobStoreClient {
    #[must_use]
    pub fn new(client: Client, bucket: String, public_base_url: String) -> Self {
        Self {
            client,
            bucket,
            public_base_url,
        }
    }
}

#[async_trait]
impl BlobStore for BlobStoreClient {
    async fn upload(&self, key: &str, content_type: &str, bytes: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(aws_sdk_s3::Error::from)?;

        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

fn join_url(base: &str, key: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), key)
}

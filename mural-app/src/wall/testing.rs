use async_trait::async_trait;
use mural_common::model::post::{CreatePost, PageCursor, Post, PostBody};
use mural_store::{BlobStore, PostStore, Result, StoreError};
use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use time::{Duration, UtcDateTime, macros::utc_datetime};

const BASE: UtcDateTime = utc_datetime!(2025-08-01 12:00);

fn transport_error() -> StoreError {
    StoreError::Table(sqlx::Error::PoolClosed)
}

fn seed_post(id: i64, created_at: UtcDateTime) -> Post {
    Post {
        id: id.into(),
        body: PostBody::new(format!("post {id}")).unwrap(),
        image_url: None,
        created_at,
        user_id: None,
    }
}

/// In-memory stand-in for the hosted row store. `fail_next` makes the next
/// call fail with a transport error, once.
pub(crate) struct FakePostStore {
    posts: Mutex<Vec<Post>>,
    selects: AtomicUsize,
    inserts: AtomicUsize,
    fail_next: AtomicBool,
}

impl FakePostStore {
    pub fn new() -> Self {
        Self::with_posts(0)
    }

    /// Seeds `count` posts, one second apart, the highest id being the
    /// newest.
    pub fn with_posts(count: i64) -> Self {
        Self::seeded((1..=count).map(|id| seed_post(id, BASE + Duration::seconds(id))))
    }

    /// Seeds `count` posts all sharing one timestamp, so ordering falls back
    /// to the id.
    pub fn with_posts_at_same_instant(count: i64) -> Self {
        Self::seeded((1..=count).map(|id| seed_post(id, BASE)))
    }

    fn seeded(posts: impl Iterator<Item = Post>) -> Self {
        Self {
            posts: Mutex::new(posts.collect()),
            selects: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.fail_next.swap(false, Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for FakePostStore {
    async fn insert_post(&self, post: &CreatePost) -> Result<Post> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        if self.take_failure() {
            return Err(transport_error());
        }

        let mut posts = self.posts.lock().unwrap();
        let id = posts.len() as i64 + 1;
        let post = Post {
            id: id.into(),
            body: post.body.clone(),
            image_url: post.image_url.clone(),
            created_at: BASE + Duration::seconds(id),
            user_id: post.user_id,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn select_page(&self, limit: u32, before: Option<PageCursor>) -> Result<Vec<Post>> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        if self.take_failure() {
            return Err(transport_error());
        }

        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.cursor().cmp(&a.cursor()));
        Ok(posts
            .into_iter()
            .filter(|post| before.is_none_or(|cursor| post.cursor() < cursor))
            .take(limit as usize)
            .collect())
    }
}

/// In-memory stand-in for the hosted object store, recording the keys of all
/// attempted uploads.
pub(crate) struct FakeBlobStore {
    uploads: Mutex<Vec<String>>,
    fail_next: AtomicBool,
}

impl FakeBlobStore {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn uploads(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn last_key(&self) -> Option<String> {
        self.uploads.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl BlobStore for FakeBlobStore {
    async fn upload(&self, key: &str, _content_type: &str, _bytes: &[u8]) -> Result<()> {
        self.uploads.lock().unwrap().push(key.to_owned());
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(transport_error());
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://blobs.invalid/wall-uploads/{key}")
    }
}

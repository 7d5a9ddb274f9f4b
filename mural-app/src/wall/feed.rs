use mural_common::model::post::{PageCursor, Post};
use mural_store::PostStore;

pub const PAGE_SIZE: u32 = 5;

/// The loaded part of the feed, newest first. Pages append as they load; the
/// cursor points at the oldest loaded post until the end of the feed is
/// reached.
#[derive(Default)]
pub struct Feed {
    posts: Vec<Post>,
    cursor: Option<PageCursor>,
    busy: bool,
}

impl Feed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Whether an older page may still be available. `false` before the first
    /// load and once the end of the feed was reached.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.cursor.is_some()
    }

    /// Fetches the newest page, replacing whatever was loaded. On failure the
    /// previous state is kept.
    pub async fn load_initial(&mut self, store: &dyn PostStore) -> mural_store::Result<()> {
        if self.busy {
            return Ok(());
        }
        self.busy = true;

        let result = store.select_page(PAGE_SIZE, None).await;
        self.busy = false;

        let page = result?;
        self.cursor = Self::next_cursor(&page);
        self.posts = page;
        Ok(())
    }

    /// Fetches the page after the cursor and appends it. A no-op while a load
    /// is in flight or once the end of the feed was reached.
    pub async fn load_more(&mut self, store: &dyn PostStore) -> mural_store::Result<()> {
        if self.busy {
            return Ok(());
        }
        let Some(cursor) = self.cursor else {
            return Ok(());
        };
        self.busy = true;

        let result = store.select_page(PAGE_SIZE, Some(cursor)).await;
        self.busy = false;

        let page = result?;
        self.cursor = Self::next_cursor(&page);
        self.posts.extend(page);
        Ok(())
    }

    /// A short page means the store ran out of older posts; a cleared cursor
    /// marks the end of the feed.
    fn next_cursor(page: &[Post]) -> Option<PageCursor> {
        if page.len() < PAGE_SIZE as usize {
            None
        } else {
            page.last().map(Post::cursor)
        }
    }
}

use crate::model::{Id, UserMarker};
use thiserror::Error;
use time::UtcDateTime;

pub const POST_BODY_MAX_LEN: usize = 280;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

/// A wall entry as stored. `id` and `created_at` are assigned by the row
/// store; posts are immutable once created.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub body: PostBody,
    pub image_url: Option<String>,
    pub created_at: UtcDateTime,
    pub user_id: Option<Id<UserMarker>>,
}

impl Post {
    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        PageCursor {
            created_at: self.created_at,
            id: self.id,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct CreatePost {
    pub body: PostBody,
    pub image_url: Option<String>,
    pub user_id: Option<Id<UserMarker>>,
}

/// Position of the oldest loaded post under the feed ordering. The feed
/// orders by `(created_at, id)` descending; the secondary key keeps rows
/// sharing a timestamp from being skipped or duplicated across a page
/// boundary.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct PageCursor {
    pub created_at: UtcDateTime,
    pub id: Id<PostMarker>,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostBody(String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The post body is too long: {0} characters")]
pub struct InvalidPostBodyError(usize);

impl PostBody {
    pub fn new(body: String) -> Result<Self, InvalidPostBodyError> {
        let chars = body.chars().count();
        if chars <= POST_BODY_MAX_LEN {
            Ok(PostBody(body))
        } else {
            Err(InvalidPostBodyError(chars))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::post::{POST_BODY_MAX_LEN, PostBody};

    #[test]
    fn body_length_limits() {
        assert!(PostBody::new(String::new()).is_ok());
        assert!(PostBody::new("hello wall".to_owned()).is_ok());
        assert!(PostBody::new("a".repeat(POST_BODY_MAX_LEN)).is_ok());
        assert!(PostBody::new("a".repeat(POST_BODY_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn body_limit_counts_chars_not_bytes() {
        let body = "ü".repeat(POST_BODY_MAX_LEN);
        assert!(body.len() > POST_BODY_MAX_LEN);
        assert!(PostBody::new(body).is_ok());
    }
}

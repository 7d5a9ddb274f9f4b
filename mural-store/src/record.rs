use mural_common::model::{
    ModelValidationError,
    post::{Post, PostBody},
};
use time::OffsetDateTime;

#[derive(Clone, Debug, sqlx::FromRow)]
pub(crate) struct PostRecord {
    pub id: i64,
    pub body: String,
    pub image_url: Option<String>,
    pub created_at: OffsetDateTime,
    pub user_id: Option<i64>,
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            body: PostBody::new(value.body)?,
            image_url: value.image_url,
            created_at: value.created_at.to_utc(),
            user_id: value.user_id.map(Into::into),
        })
    }
}

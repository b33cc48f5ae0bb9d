use crate::model::{
    Id,
    post::PostMarker,
    user::{User, UserId},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct CommentMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Comment {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    pub user_id: UserId,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author: Option<User>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct CommentContent {
    pub text: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CreateComment {
    pub post_id: Id<PostMarker>,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Comment text must not be blank.")]
pub struct BlankCommentError;

impl CreateComment {
    pub fn validate(&self) -> Result<(), BlankCommentError> {
        if self.text.trim().is_empty() {
            Err(BlankCommentError)
        } else {
            Ok(())
        }
    }
}

use crate::model::{
    Id,
    user::{User, UserId},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Populated by the author join when the post is read.
    pub author: Option<User>,
}

impl Post {
    #[must_use]
    pub fn editable_content(&self) -> PostContent {
        PostContent {
            title: self.title.clone(),
            content: self.content.clone(),
            summary: self.summary.clone(),
        }
    }
}

/// The author-editable part of a post.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostContent {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CreatePost {
    pub author_id: UserId,
    pub content: PostContent,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Title and content are required.")]
pub struct IncompletePostError;

impl PostContent {
    pub fn validate(&self) -> Result<(), IncompletePostError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            Err(IncompletePostError)
        } else {
            Ok(())
        }
    }

    /// The summary as it should be stored: blank summaries become `None`.
    #[must_use]
    pub fn stored_summary(&self) -> Option<String> {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|summary| !summary.is_empty())
            .map(str::to_owned)
    }
}

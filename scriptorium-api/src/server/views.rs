//! Response bodies the pages are rendered from.

use crate::{render, session::SessionState};
use scriptorium_common::model::{
    Id,
    comment::Comment,
    post::{Post, PostMarker},
    user::User,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A card in the post listing.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct PostPreview {
    pub id: Id<PostMarker>,
    pub title: String,
    pub author: Option<User>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub excerpt: String,
}

impl From<Post> for PostPreview {
    fn from(post: Post) -> Self {
        Self {
            excerpt: render::excerpt(&post),
            id: post.id,
            title: post.title,
            author: post.author,
            created_at: post.created_at,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub content_html: String,
    pub comments: Vec<Comment>,
}

impl PostDetail {
    #[must_use]
    pub fn new(post: Post, comments: Vec<Comment>) -> Self {
        Self {
            content_html: render::markdown_to_html(&post.content),
            post,
            comments,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub signed_in: bool,
    pub user: Option<User>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub struct SummaryRequest {
    pub content: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

use crate::record::{CommentRecord, PostRecord, UserRecord};
use scriptorium_common::{
    model::{comment::CommentMarker, post::PostMarker},
    sequence::IdSequence,
};

/// The contents of the store: one table per record type plus the
/// identifier sequences of the insertable tables.
#[derive(Clone, Debug, Default)]
pub struct Tables {
    pub(crate) users: Vec<UserRecord>,
    pub(crate) posts: Vec<PostRecord>,
    pub(crate) comments: Vec<CommentRecord>,
    pub(crate) post_ids: IdSequence<PostMarker>,
    pub(crate) comment_ids: IdSequence<CommentMarker>,
}

impl Tables {
    /// Builds tables from existing rows; new identifiers continue after the
    /// largest existing one.
    #[must_use]
    pub fn new(
        users: Vec<UserRecord>,
        posts: Vec<PostRecord>,
        comments: Vec<CommentRecord>,
    ) -> Self {
        let post_ids = IdSequence::following(posts.iter().map(|post| post.id));
        let comment_ids = IdSequence::following(comments.iter().map(|comment| comment.id));

        Self {
            users,
            posts,
            comments,
            post_ids,
            comment_ids,
        }
    }

    #[cfg(test)]
    pub(crate) fn post_count(&self) -> usize {
        self.posts.len()
    }

    #[cfg(test)]
    pub(crate) fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

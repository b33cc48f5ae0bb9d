use crate::{
    query::{Direction, Query},
    record::{
        CommentColumn, CommentRecord, Insertable, PostColumn, PostRecord, Record, UserColumn,
        UserRecord,
    },
    seed,
    table::Tables,
};
use scriptorium_common::model::{
    Id, ModelValidationError,
    comment::{Comment, CreateComment},
    post::{CreatePost, Post, PostContent, PostMarker},
    user::{User, UserId},
};
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

/// Simulated round trip of every store call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

pub type Result<T, E = DbError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Validation(#[from] ModelValidationError),
    #[error("Insert into {0} returned no row")]
    NothingInserted(&'static str),
}

#[derive(Debug)]
pub struct DbClient {
    tables: RwLock<Tables>,
    latency: Duration,
}

impl DbClient {
    #[must_use]
    pub fn new(tables: Tables, latency: Duration) -> Self {
        Self {
            tables: RwLock::new(tables),
            latency,
        }
    }

    /// A store holding the seed rows, created relative to the current time.
    #[must_use]
    pub fn seeded(latency: Duration) -> Self {
        Self::new(seed::tables(OffsetDateTime::now_utc()), latency)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Evaluates `query` against a snapshot of the table of `R` and joins
    /// authors into the resulting rows.
    pub async fn select<R: Record>(&self, query: &Query<R>) -> Result<Vec<R::Model>> {
        let models = {
            let tables = self.tables.read().await;
            let rows = query.evaluate(R::rows(&tables).to_vec());

            debug!(
                table = R::TABLE,
                filters = query.filters().len(),
                orders = query.orders().len(),
                matched = rows.len(),
                "Evaluated query"
            );

            rows.into_iter()
                .map(|row| row.join(&tables.users))
                .collect()
        };

        self.simulate_latency().await;
        Ok(models)
    }

    /// Like [`Self::select`], but only returns the first row of the working set.
    pub async fn select_single<R: Record>(&self, query: &Query<R>) -> Result<Option<R::Model>> {
        let model = {
            let tables = self.tables.read().await;
            let row = query.evaluate_single(R::rows(&tables).to_vec());

            debug!(table = R::TABLE, found = row.is_some(), "Evaluated single query");

            row.map(|row| row.join(&tables.users))
        };

        self.simulate_latency().await;
        Ok(model)
    }

    /// Appends new rows to the table of `R`, each with the next identifier and
    /// the current time. Returns exactly the inserted rows, unjoined.
    pub async fn insert<R, I>(&self, new: I) -> Result<Vec<R::Model>>
    where
        R: Insertable,
        I: IntoIterator<Item = R::New>,
    {
        let created_at = OffsetDateTime::now_utc();
        let inserted: Vec<R> = {
            let mut tables = self.tables.write().await;
            new.into_iter()
                .map(|new| R::append(&mut tables, new, created_at))
                .collect()
        };

        debug!(table = R::TABLE, inserted = inserted.len(), "Inserted rows");

        self.simulate_latency().await;
        Ok(inserted.into_iter().map(R::into_stored).collect())
    }

    async fn insert_one<R: Insertable>(&self, new: R::New) -> Result<R::Model> {
        self.insert::<R, _>([new])
            .await?
            .pop()
            .ok_or(DbError::NothingInserted(R::TABLE))
    }

    pub async fn fetch_user(&self, user_id: &UserId) -> Result<Option<User>> {
        self.select_single(&Query::<UserRecord>::new().eq(UserColumn::Id, user_id))
            .await
    }

    pub async fn fetch_post(&self, post_id: Id<PostMarker>) -> Result<Option<Post>> {
        self.select_single(&Query::<PostRecord>::new().eq(PostColumn::Id, post_id))
            .await
    }

    /// All posts, newest first, optionally narrowed by a text search over
    /// content and title.
    pub async fn fetch_posts(&self, search: Option<&str>) -> Result<Vec<Post>> {
        let mut query =
            Query::<PostRecord>::new().order(PostColumn::CreatedAt, Direction::Descending);
        if let Some(search) = search {
            query = query.text_search(PostColumn::Content, search);
        }

        self.select(&query).await
    }

    /// The posts of a user, newest first, or `None` if the user does not exist.
    pub async fn fetch_user_posts(&self, user_id: &UserId) -> Result<Option<Vec<Post>>> {
        if self.fetch_user(user_id).await?.is_none() {
            return Ok(None);
        }

        let query = Query::<PostRecord>::new()
            .eq(PostColumn::AuthorId, user_id)
            .order(PostColumn::CreatedAt, Direction::Descending);

        Ok(Some(self.select(&query).await?))
    }

    pub async fn create_post(&self, post: &CreatePost) -> Result<Post> {
        post.content
            .validate()
            .map_err(ModelValidationError::from)?;

        self.insert_one::<PostRecord>(post.clone()).await
    }

    /// Replaces title, content and summary of an existing post. Identifier,
    /// author and creation time are kept.
    pub async fn update_post(
        &self,
        post_id: Id<PostMarker>,
        content: &PostContent,
    ) -> Result<Option<Post>> {
        content.validate().map_err(ModelValidationError::from)?;

        let updated = {
            let mut tables = self.tables.write().await;
            let Tables { users, posts, .. } = &mut *tables;

            posts
                .iter_mut()
                .find(|post| post.id == post_id)
                .map(|post| {
                    post.title.clone_from(&content.title);
                    post.content.clone_from(&content.content);
                    post.summary = content.stored_summary();
                    post.clone().join(users)
                })
        };

        debug!(%post_id, found = updated.is_some(), "Updated post");

        self.simulate_latency().await;
        Ok(updated)
    }

    /// Comments on a post, newest first.
    pub async fn fetch_comments(&self, post_id: Id<PostMarker>) -> Result<Vec<Comment>> {
        let query = Query::<CommentRecord>::new()
            .eq(CommentColumn::PostId, post_id)
            .order(CommentColumn::CreatedAt, Direction::Descending);

        self.select(&query).await
    }

    pub async fn create_comment(&self, comment: &CreateComment) -> Result<Comment> {
        comment.validate().map_err(ModelValidationError::from)?;

        self.insert_one::<CommentRecord>(comment.clone()).await
    }
}

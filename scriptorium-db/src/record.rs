use crate::table::Tables;
use scriptorium_common::model::{
    Id,
    comment::{Comment, CommentMarker, CreateComment},
    post::{CreatePost, Post, PostMarker},
    user::{User, UserId},
};
use std::fmt::Debug;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// A row of one of the in-memory tables.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    type Column: Copy + Eq + Debug + Send + Sync + 'static;
    /// What a row turns into once it leaves the store.
    type Model;

    const TABLE: &'static str;
    /// Column that text search matches in addition to the requested one.
    const TITLE_COLUMN: Option<Self::Column> = None;

    fn field(&self, column: Self::Column) -> Field<'_>;

    fn rows(tables: &Tables) -> &[Self];

    /// Converts the row into its model, attaching the author from `users`.
    fn join(self, users: &[UserRecord]) -> Self::Model;
}

/// A [`Record`] that can be created through an insert.
pub trait Insertable: Record {
    type New;

    /// Assigns the next identifier, appends the row and returns it.
    fn append(tables: &mut Tables, new: Self::New, created_at: OffsetDateTime) -> Self;

    /// Converts a freshly inserted row into its model without joining.
    fn into_stored(self) -> Self::Model;
}

/// A borrowed column value of a row.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Field<'a> {
    Integer(u64),
    Text(&'a str),
    Timestamp(OffsetDateTime),
    Null,
}

/// An owned value that fields are compared against.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Value {
    Integer(u64),
    Text(String),
    Timestamp(OffsetDateTime),
    Null,
}

impl<'a> Field<'a> {
    /// Strict equality: a field only equals a value of the same kind.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        match (self, value) {
            (Field::Integer(field), Value::Integer(value)) => field == *value,
            (Field::Text(field), Value::Text(value)) => field == value.as_str(),
            (Field::Timestamp(field), Value::Timestamp(value)) => field == *value,
            (Field::Null, Value::Null) => true,
            _ => false,
        }
    }

    /// The field as searchable text. Non-text fields search as empty text.
    #[must_use]
    pub fn as_text(self) -> &'a str {
        match self {
            Field::Text(text) => text,
            _ => "",
        }
    }

    #[must_use]
    pub fn as_timestamp(self) -> Option<OffsetDateTime> {
        match self {
            Field::Timestamp(timestamp) => Some(timestamp),
            Field::Text(text) => OffsetDateTime::parse(text, &Rfc3339).ok(),
            Field::Integer(_) | Field::Null => None,
        }
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Integer(value)
    }
}

impl<Marker> From<Id<Marker>> for Value {
    fn from(value: Id<Marker>) -> Self {
        Value::Integer(value.get())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&UserId> for Value {
    fn from(value: &UserId) -> Self {
        Value::Text(value.get().to_owned())
    }
}

impl From<OffsetDateTime> for Value {
    fn from(value: OffsetDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct UserRecord {
    pub id: UserId,
    pub full_name: Option<String>,
    pub image_url: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct PostRecord {
    pub id: Id<PostMarker>,
    pub title: String,
    pub content: String,
    pub summary: Option<String>,
    pub author_id: UserId,
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct CommentRecord {
    pub id: Id<CommentMarker>,
    pub post_id: Id<PostMarker>,
    pub user_id: UserId,
    pub text: String,
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum UserColumn {
    Id,
    FullName,
    ImageUrl,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PostColumn {
    Id,
    Title,
    Content,
    Summary,
    AuthorId,
    CreatedAt,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CommentColumn {
    Id,
    PostId,
    UserId,
    Text,
    CreatedAt,
}

fn find_user(users: &[UserRecord], id: &UserId) -> Option<User> {
    users
        .iter()
        .find(|user| user.id == *id)
        .cloned()
        .map(User::from)
}

impl From<UserRecord> for User {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            image_url: value.image_url,
        }
    }
}

impl PostRecord {
    fn into_post(self, author: Option<User>) -> Post {
        Post {
            id: self.id,
            title: self.title,
            content: self.content,
            summary: self.summary,
            author_id: self.author_id,
            created_at: self.created_at,
            author,
        }
    }
}

impl CommentRecord {
    fn into_comment(self, author: Option<User>) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            user_id: self.user_id,
            text: self.text,
            created_at: self.created_at,
            author,
        }
    }
}

impl Record for UserRecord {
    type Column = UserColumn;
    type Model = User;

    const TABLE: &'static str = "users";

    fn field(&self, column: UserColumn) -> Field<'_> {
        match column {
            UserColumn::Id => Field::Text(self.id.get()),
            UserColumn::FullName => self.full_name.as_deref().map_or(Field::Null, Field::Text),
            UserColumn::ImageUrl => Field::Text(&self.image_url),
        }
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.users
    }

    fn join(self, _users: &[UserRecord]) -> User {
        self.into()
    }
}

impl Record for PostRecord {
    type Column = PostColumn;
    type Model = Post;

    const TABLE: &'static str = "posts";
    const TITLE_COLUMN: Option<PostColumn> = Some(PostColumn::Title);

    fn field(&self, column: PostColumn) -> Field<'_> {
        match column {
            PostColumn::Id => Field::Integer(self.id.get()),
            PostColumn::Title => Field::Text(&self.title),
            PostColumn::Content => Field::Text(&self.content),
            PostColumn::Summary => self.summary.as_deref().map_or(Field::Null, Field::Text),
            PostColumn::AuthorId => Field::Text(self.author_id.get()),
            PostColumn::CreatedAt => Field::Timestamp(self.created_at),
        }
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.posts
    }

    fn join(self, users: &[UserRecord]) -> Post {
        let author = find_user(users, &self.author_id);
        self.into_post(author)
    }
}

impl Insertable for PostRecord {
    type New = CreatePost;

    fn append(tables: &mut Tables, new: CreatePost, created_at: OffsetDateTime) -> Self {
        let record = PostRecord {
            id: tables.post_ids.generate(),
            summary: new.content.stored_summary(),
            title: new.content.title,
            content: new.content.content,
            author_id: new.author_id,
            created_at,
        };

        tables.posts.push(record.clone());
        record
    }

    fn into_stored(self) -> Post {
        self.into_post(None)
    }
}

impl Record for CommentRecord {
    type Column = CommentColumn;
    type Model = Comment;

    const TABLE: &'static str = "comments";

    fn field(&self, column: CommentColumn) -> Field<'_> {
        match column {
            CommentColumn::Id => Field::Integer(self.id.get()),
            CommentColumn::PostId => Field::Integer(self.post_id.get()),
            CommentColumn::UserId => Field::Text(self.user_id.get()),
            CommentColumn::Text => Field::Text(&self.text),
            CommentColumn::CreatedAt => Field::Timestamp(self.created_at),
        }
    }

    fn rows(tables: &Tables) -> &[Self] {
        &tables.comments
    }

    fn join(self, users: &[UserRecord]) -> Comment {
        let author = find_user(users, &self.user_id);
        self.into_comment(author)
    }
}

impl Insertable for CommentRecord {
    type New = CreateComment;

    fn append(tables: &mut Tables, new: CreateComment, created_at: OffsetDateTime) -> Self {
        let record = CommentRecord {
            id: tables.comment_ids.generate(),
            post_id: new.post_id,
            user_id: new.user_id,
            text: new.text,
            created_at,
        };

        tables.comments.push(record.clone());
        record
    }

    fn into_stored(self) -> Comment {
        self.into_comment(None)
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Field, Value};
    use time::macros::datetime;

    #[test]
    fn strict_equality() {
        assert!(Field::Integer(1).matches(&Value::Integer(1)));
        assert!(!Field::Integer(1).matches(&Value::Text("1".to_owned())));
        assert!(!Field::Text("1").matches(&Value::Integer(1)));
        assert!(Field::Text("user_1").matches(&"user_1".into()));
        assert!(Field::Null.matches(&Value::from(None::<&str>)));
        assert!(!Field::Null.matches(&Value::Text(String::new())));
    }

    #[test]
    fn timestamps_from_fields() {
        let timestamp = datetime!(2025-03-01 12:00 UTC);

        assert_eq!(Field::Timestamp(timestamp).as_timestamp(), Some(timestamp));
        assert_eq!(
            Field::Text("2025-03-01T12:00:00Z").as_timestamp(),
            Some(timestamp)
        );
        assert_eq!(Field::Text("yesterday").as_timestamp(), None);
        assert_eq!(Field::Integer(5).as_timestamp(), None);
        assert_eq!(Field::Null.as_timestamp(), None);
    }
}

use crate::server::{
    Result, ServerError, ServerRouter,
    auth::AuthenticatedUser,
    json::Json,
    query::Query,
    views::{PostDetail, PostPreview},
};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use scriptorium_common::model::{
    Id,
    post::{CreatePost, Post, PostContent, PostMarker},
};
use scriptorium_db::client::DbClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_posts)
        .typed_post(create_post)
        .typed_get(get_post)
        .typed_put(update_post)
        .typed_get(edit_post)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts", rejection(ServerError))]
struct PostsPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}", rejection(ServerError))]
struct PostPath {
    id: Id<PostMarker>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/edit", rejection(ServerError))]
struct EditPostPath {
    id: Id<PostMarker>,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
struct ListPostsParams {
    search: Option<String>,
}

async fn list_posts(
    PostsPath(): PostsPath,
    State(db): State<Arc<DbClient>>,
    Query(ListPostsParams { search }): Query<ListPostsParams>,
) -> Result<Json<Vec<PostPreview>>> {
    let posts = db.fetch_posts(search.as_deref()).await?;

    Ok(Json(posts.into_iter().map(PostPreview::from).collect()))
}

async fn create_post(
    PostsPath(): PostsPath,
    State(db): State<Arc<DbClient>>,
    user: AuthenticatedUser,
    Json(content): Json<PostContent>,
) -> Result<(StatusCode, Json<Post>)> {
    let post = db
        .create_post(&CreatePost {
            author_id: user.into_user_id(),
            content,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    PostPath { id }: PostPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Json<PostDetail>> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;
    let comments = db.fetch_comments(id).await?;

    Ok(Json(PostDetail::new(post, comments)))
}

/// Fetches a post the user is allowed to edit.
async fn authored_post(
    db: &DbClient,
    id: Id<PostMarker>,
    user: &AuthenticatedUser,
) -> Result<Post> {
    let post = db
        .fetch_post(id)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    if post.author_id == *user.user_id() {
        Ok(post)
    } else {
        Err(ServerError::NotPostAuthor(id))
    }
}

async fn edit_post(
    EditPostPath { id }: EditPostPath,
    State(db): State<Arc<DbClient>>,
    user: AuthenticatedUser,
) -> Result<Json<PostContent>> {
    let post = authored_post(&db, id, &user).await?;

    Ok(Json(post.editable_content()))
}

async fn update_post(
    PostPath { id }: PostPath,
    State(db): State<Arc<DbClient>>,
    user: AuthenticatedUser,
    Json(content): Json<PostContent>,
) -> Result<Json<Post>> {
    authored_post(&db, id, &user).await?;

    let post = db
        .update_post(id, &content)
        .await?
        .ok_or(ServerError::PostByIdNotFound(id))?;

    Ok(Json(post))
}

use crate::server::{Result, ServerError, ServerRouter, auth::AuthenticatedUser, json::Json};
use axum::{extract::State, http::StatusCode};
use axum_extra::routing::{RouterExt, TypedPath};
use scriptorium_common::model::{
    Id,
    comment::{Comment, CommentContent, CreateComment},
    post::PostMarker,
};
use scriptorium_db::client::DbClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(list_comments)
        .typed_post(create_comment)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/posts/{id}/comments", rejection(ServerError))]
struct PostCommentsPath {
    id: Id<PostMarker>,
}

async fn ensure_post_exists(db: &DbClient, id: Id<PostMarker>) -> Result<()> {
    db.fetch_post(id)
        .await?
        .map(|_| ())
        .ok_or(ServerError::PostByIdNotFound(id))
}

async fn list_comments(
    PostCommentsPath { id }: PostCommentsPath,
    State(db): State<Arc<DbClient>>,
) -> Result<Json<Vec<Comment>>> {
    ensure_post_exists(&db, id).await?;

    Ok(Json(db.fetch_comments(id).await?))
}

async fn create_comment(
    PostCommentsPath { id }: PostCommentsPath,
    State(db): State<Arc<DbClient>>,
    user: AuthenticatedUser,
    Json(CommentContent { text }): Json<CommentContent>,
) -> Result<(StatusCode, Json<Comment>)> {
    ensure_post_exists(&db, id).await?;

    let comment = db
        .create_comment(&CreateComment {
            post_id: id,
            user_id: user.into_user_id(),
            text,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

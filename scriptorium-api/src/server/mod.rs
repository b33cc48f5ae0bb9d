use crate::{
    session::{AuthSession, SessionError},
    summary::{SUMMARY_FAILED_MESSAGE, SummaryClient, SummaryError},
};
use axum::{
    Router,
    extract::{
        FromRef, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use json::Json;
use scriptorium_common::model::{Id, post::PostMarker, user::UserId};
use scriptorium_db::client::{DbClient, DbError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

mod auth;
mod json;
mod query;
mod routes;
mod views;


const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong on our side.";

pub type ServerRouter = Router<ServerState>;

#[derive(Clone, Debug, FromRef)]
pub struct ServerState {
    pub db_client: Arc<DbClient>,
    pub session: Arc<AuthSession>,
    pub summary_client: Arc<SummaryClient>,
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Query string rejected: {0}")]
    QueryRejection(#[from] QueryRejection),
    #[error("Incoming JSON rejected: {0}")]
    JsonRejection(#[from] JsonRejection),
    #[error("JSON response could not be serialized: {0}")]
    JsonResponse(#[from] serde_json::Error),
    #[error("You need to sign in to do this.")]
    SignedOut,
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
    #[error("User with id {0} was not found.")]
    UserByIdNotFound(UserId),
    #[error("Only the author can edit post {0}.")]
    NotPostAuthor(Id<PostMarker>),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PostByIdNotFound(_)
            | ServerError::UserByIdNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::PathRejection(_)
            | ServerError::QueryRejection(_)
            | ServerError::JsonRejection(_)
            | ServerError::Summary(SummaryError::EmptyContent)
            | ServerError::Database(DbError::Validation(_)) => StatusCode::BAD_REQUEST,
            ServerError::SignedOut => StatusCode::UNAUTHORIZED,
            ServerError::NotPostAuthor(_) => StatusCode::FORBIDDEN,
            ServerError::Summary(_) => StatusCode::BAD_GATEWAY,
            ServerError::JsonResponse(_)
            | ServerError::Session(_)
            | ServerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the caller gets to read. Internals of server side failures stay
    /// in the logs.
    pub fn message(&self) -> String {
        match self {
            ServerError::Summary(SummaryError::EmptyContent) => self.to_string(),
            ServerError::Summary(_) => SUMMARY_FAILED_MESSAGE.to_owned(),
            _ if self.status().is_server_error() => INTERNAL_ERROR_MESSAGE.to_owned(),
            _ => self.to_string(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        let error_response = ErrorResponse {
            status: status.as_u16(),
            message: self.message(),
        };
        (status, Json(error_response)).into_response()
    }
}

use crate::{
    server::{Result, ServerError, ServerRouter, json::Json, views::SessionView},
    session::{AuthSession, SessionState},
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use scriptorium_db::client::DbClient;
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(get_session)
        .typed_post(sign_in)
        .typed_post(sign_out)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/session", rejection(ServerError))]
struct SessionPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/session/sign-in", rejection(ServerError))]
struct SignInPath();

#[derive(TypedPath, Deserialize)]
#[typed_path("/session/sign-out", rejection(ServerError))]
struct SignOutPath();

async fn session_view(
    db: &DbClient,
    session: &AuthSession,
    state: SessionState,
) -> Result<SessionView> {
    let user = match state {
        SessionState::SignedIn => db.fetch_user(session.user_id()).await?,
        SessionState::SignedOut => None,
    };

    Ok(SessionView {
        state,
        signed_in: state == SessionState::SignedIn,
        user,
    })
}

async fn get_session(
    SessionPath(): SessionPath,
    State(db): State<Arc<DbClient>>,
    State(session): State<Arc<AuthSession>>,
) -> Result<Json<SessionView>> {
    let state = session.state().await;

    Ok(Json(session_view(&db, &session, state).await?))
}

async fn sign_in(
    SignInPath(): SignInPath,
    State(db): State<Arc<DbClient>>,
    State(session): State<Arc<AuthSession>>,
) -> Result<Json<SessionView>> {
    let state = session.sign_in().await?;

    Ok(Json(session_view(&db, &session, state).await?))
}

async fn sign_out(
    SignOutPath(): SignOutPath,
    State(db): State<Arc<DbClient>>,
    State(session): State<Arc<AuthSession>>,
) -> Result<Json<SessionView>> {
    let state = session.sign_out().await?;

    Ok(Json(session_view(&db, &session, state).await?))
}

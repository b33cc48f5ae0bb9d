use crate::{server::ServerError, session::AuthSession};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use scriptorium_common::model::user::UserId;
use std::sync::Arc;

/// The signed-in user. Rejects with 401 while the session is signed out.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct AuthenticatedUser {
    id: UserId,
}

impl AuthenticatedUser {
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn into_user_id(self) -> UserId {
        self.id
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<AuthSession>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = Arc::<AuthSession>::from_ref(state)
            .signed_in_user()
            .await
            .ok_or(ServerError::SignedOut)?;

        Ok(Self { id })
    }
}

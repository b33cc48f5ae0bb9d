//! The mock sign-in session.
//!
//! There is no real identity provider: signing in flips a flag that is kept
//! in a small JSON key-value file, so it survives restarts. The signed-in
//! user is always the same mock user.

use scriptorium_common::model::user::UserId;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

pub const AUTH_STATE_KEY: &str = "auth_state";
pub const SIGNED_IN_SENTINEL: &str = "signed_in";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not access local storage at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Local storage at {} is not valid: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage backed by one JSON object on disk.
///
/// A missing file reads as empty storage.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.read_all().await?.remove(key))
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_all(&entries).await
    }

    pub async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }

        Ok(())
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, SessionError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| SessionError::Json {
                path: self.path.clone(),
                source,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(SessionError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Replaces the file through a rename, so a reader never sees it half
    /// written.
    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        let json = serde_json::to_vec_pretty(entries).map_err(|source| SessionError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp_path = self.path.with_extension("tmp");
        let io_error = |source: std::io::Error| SessionError::Io {
            path: self.path.clone(),
            source,
        };

        tokio::fs::write(&tmp_path, json).await.map_err(io_error)?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(io_error)
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

/// Session of the single mock user.
///
/// The persisted state is read once in [`AuthSession::load`]; afterwards the
/// in-memory state and the storage are updated together.
#[derive(Debug)]
pub struct AuthSession {
    storage: LocalStorage,
    user_id: UserId,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub async fn load(storage: LocalStorage, user_id: UserId) -> Result<Self, SessionError> {
        let state = match storage.get_item(AUTH_STATE_KEY).await?.as_deref() {
            Some(SIGNED_IN_SENTINEL) => SessionState::SignedIn,
            _ => SessionState::SignedOut,
        };

        info!(?state, path = %storage.path().display(), "Loaded session");

        Ok(Self {
            storage,
            user_id,
            state: RwLock::new(state),
        })
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    /// The mock user, no matter whether they are signed in.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub async fn signed_in_user(&self) -> Option<UserId> {
        match self.state().await {
            SessionState::SignedIn => Some(self.user_id.clone()),
            SessionState::SignedOut => None,
        }
    }

    pub async fn sign_in(&self) -> Result<SessionState, SessionError> {
        let mut state = self.state.write().await;
        self.storage
            .set_item(AUTH_STATE_KEY, SIGNED_IN_SENTINEL)
            .await?;
        *state = SessionState::SignedIn;

        info!(user_id = %self.user_id, "Signed in");
        Ok(*state)
    }

    pub async fn sign_out(&self) -> Result<SessionState, SessionError> {
        let mut state = self.state.write().await;
        self.storage.remove_item(AUTH_STATE_KEY).await?;
        *state = SessionState::SignedOut;

        info!(user_id = %self.user_id, "Signed out");
        Ok(*state)
    }
}

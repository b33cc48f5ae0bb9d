use crate::{
    server::ServerState,
    session::{AuthSession, LocalStorage, SessionError},
    summary::{
        DEFAULT_SUMMARY_BASE_URL, DEFAULT_SUMMARY_MODEL, SummaryClient, SummaryConfig, SummaryError,
    },
};
use scriptorium_common::model::user::UserId;
use scriptorium_db::{
    client::{DEFAULT_LATENCY, DbClient},
    seed::JANE_DOE_ID,
};
use serde::Deserialize;
use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    sync::Arc,
    time::Duration,
};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod server;
mod session;
mod summary;

#[derive(Debug, Error)]
enum InitError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error loading session: {0}")]
    Session(#[from] SessionError),
    #[error("Error creating summary client: {0}")]
    Summary(#[from] SummaryError),
    #[error("Error binding tcp listener: {0}")]
    TcpBind(std::io::Error),
    #[error("Error serving server: {0}")]
    TcpServe(std::io::Error),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
struct Env {
    server_address: IpAddr,
    server_port: u16,
    #[serde(default = "default_query_latency_ms")]
    query_latency_ms: u64,
    #[serde(default = "default_storage_path")]
    storage_path: PathBuf,
    summary_api_key: Option<String>,
    #[serde(default = "default_summary_model")]
    summary_model: String,
    #[serde(default = "default_summary_base_url")]
    summary_base_url: String,
}

fn default_query_latency_ms() -> u64 {
    DEFAULT_LATENCY
        .as_millis()
        .try_into()
        .unwrap_or(u64::MAX)
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("scriptorium-storage.json")
}

fn default_summary_model() -> String {
    DEFAULT_SUMMARY_MODEL.to_owned()
}

fn default_summary_base_url() -> String {
    DEFAULT_SUMMARY_BASE_URL.to_owned()
}

impl Env {
    fn summary_config(&self) -> SummaryConfig {
        SummaryConfig::new(
            self.summary_api_key.clone(),
            self.summary_model.clone(),
            self.summary_base_url.clone(),
        )
    }
}

fn install_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "scriptorium_api=debug,\
                scriptorium_db=debug,\
                tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn get_env() -> Result<Env, InitError> {
    if let Err(e) = dotenvy::dotenv() {
        if e.not_found() {
            debug!("No .dotenv file found");
        } else {
            return Err(e.into());
        }
    }

    envy::from_env().map_err(InitError::from)
}

async fn cancel_on_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Received Ctrl-C, shutting down");
            shutdown.cancel();
        }
        Err(err) => error!(error = %err, "Could not listen for Ctrl-C"),
    }
}

#[tokio::main]
async fn main() -> Result<(), InitError> {
    install_tracing();
    let env = get_env()?;

    let summary_client = SummaryClient::new(env.summary_config())?;
    if !summary_client.is_configured() {
        warn!("No SUMMARY_API_KEY set, summaries will be placeholders");
    }

    let session = AuthSession::load(
        LocalStorage::new(env.storage_path.clone()),
        UserId::new_unchecked(JANE_DOE_ID),
    )
    .await?;

    let state = ServerState {
        db_client: Arc::new(DbClient::seeded(Duration::from_millis(
            env.query_latency_ms,
        ))),
        session: Arc::new(session),
        summary_client: Arc::new(summary_client),
    };

    let tracing_layer = TraceLayer::new_for_http();
    let app = server::routes().with_state(state).layer(tracing_layer);

    let server_address = SocketAddr::new(env.server_address, env.server_port);
    let listener = tokio::net::TcpListener::bind(server_address)
        .await
        .map_err(InitError::TcpBind)?;
    info!(%server_address, "Listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(InitError::TcpServe)?;

    info!("Server stopped");
    Ok(())
}

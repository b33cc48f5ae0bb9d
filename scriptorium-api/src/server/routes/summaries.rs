use crate::{
    server::{
        Result, ServerError, ServerRouter,
        auth::AuthenticatedUser,
        json::Json,
        views::{SummaryRequest, SummaryResponse},
    },
    summary::SummaryClient,
};
use axum::extract::State;
use axum_extra::routing::{RouterExt, TypedPath};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> ServerRouter {
    ServerRouter::new().typed_post(generate_summary)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/summaries", rejection(ServerError))]
struct SummariesPath();

async fn generate_summary(
    SummariesPath(): SummariesPath,
    State(summary_client): State<Arc<SummaryClient>>,
    _user: AuthenticatedUser,
    Json(SummaryRequest { content }): Json<SummaryRequest>,
) -> Result<Json<SummaryResponse>> {
    let summary = summary_client.generate(&content).await?;

    Ok(Json(SummaryResponse { summary }))
}

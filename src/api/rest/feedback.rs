use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::rest::csv_download;
use crate::engine::simulated;
use crate::error::AppError;
use crate::filter::criteria::{archived_visibility, feedback_kind, feedback_search, feedback_status};
use crate::filter::page::{paginate, Page};
use crate::filter::Filter;
use crate::models::feedback::{Feedback, FeedbackKind, FeedbackStatus, FeedbackSummary};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/feedback", get(list_feedback))
        .route("/feedback/summary", get(feedback_summary))
        .route("/feedback/export", get(export_feedback))
        .route("/feedback/:id/respond", post(respond))
        .route("/feedback/:id/archive", post(archive))
}

#[derive(Debug, Default, Deserialize)]
pub struct FeedbackQuery {
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FeedbackKind>,
    pub status: Option<FeedbackStatus>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl FeedbackQuery {
    fn filter(&self) -> Filter<Feedback> {
        Filter::new()
            .with_opt(feedback_search(self.search.as_deref()))
            .with_opt(self.kind.map(feedback_kind))
            .with_opt(self.status.map(feedback_status))
            .with(archived_visibility(self.status))
    }
}

#[derive(Deserialize)]
pub struct RespondRequest {
    pub response: String,
}

async fn list_feedback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedbackQuery>,
) -> Json<Page<Feedback>> {
    let feedback = query.filter().apply(state.store.feedback());
    Json(paginate(feedback, query.page, query.per_page))
}

async fn feedback_summary(State(state): State<Arc<AppState>>) -> Json<FeedbackSummary> {
    Json(FeedbackSummary::from_feedback(&state.store.feedback()))
}

async fn export_feedback(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FeedbackQuery>,
) -> Result<Response, AppError> {
    let feedback = query.filter().apply(state.store.feedback());
    csv_download(&state, "feedback", feedback).await
}

async fn respond(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondRequest>,
) -> Result<Json<Feedback>, AppError> {
    let feedback = simulated::run(&state, "respond_feedback", state.delays.action, || {
        state.store.respond_to_feedback(id, payload.response)
    })
    .await?;

    Ok(Json(feedback))
}

async fn archive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Feedback>, AppError> {
    let feedback = simulated::run(&state, "archive_feedback", state.delays.archive, || {
        state.store.archive_feedback(id)
    })
    .await?;

    Ok(Json(feedback))
}

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{assignment, simulated};
use crate::error::AppError;
use crate::filter::criteria::{flagged, request_status};
use crate::filter::Filter;
use crate::models::assignment::Assignment;
use crate::models::request::{DonationRequest, RequestStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/requests", get(list_requests))
        .route("/requests/:id", get(get_request))
        .route("/requests/:id/approve", post(approve_request))
        .route("/requests/:id/reject", post(reject_request))
        .route("/requests/:id/fulfill", post(fulfill_request))
        .route("/requests/:id/flag", post(flag_request).delete(unflag_request))
        .route("/requests/:id/assign", post(assign_request))
        .route("/requests/:id/auto-assign", post(auto_assign_request))
        .route("/assignments", get(list_assignments))
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub flagged: Option<bool>,
}

#[derive(Deserialize)]
pub struct FlagRequest {
    pub reason: String,
}

#[derive(Deserialize)]
pub struct AssignRequest {
    pub shopkeeper_id: Uuid,
}

/// A request as the monitoring table shows it.
#[derive(Serialize)]
pub struct RequestView {
    #[serde(flatten)]
    pub request: DonationRequest,
    pub total_cost: u64,
    pub display_status: &'static str,
}

impl From<DonationRequest> for RequestView {
    fn from(request: DonationRequest) -> Self {
        Self {
            total_cost: request.total_cost(),
            display_status: request.display_status(),
            request,
        }
    }
}

async fn list_requests(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RequestQuery>,
) -> Json<Vec<RequestView>> {
    let filter = Filter::new()
        .with_opt(query.status.map(request_status))
        .with_opt(query.flagged.map(flagged));

    let requests = filter
        .apply(state.store.requests())
        .into_iter()
        .map(RequestView::from)
        .collect();

    Json(requests)
}

async fn get_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    Ok(Json(state.store.request(id)?.into()))
}

async fn approve_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    transition(&state, id, RequestStatus::Approved, "approve_request").await
}

async fn reject_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    transition(&state, id, RequestStatus::Rejected, "reject_request").await
}

async fn fulfill_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    transition(&state, id, RequestStatus::Fulfilled, "fulfill_request").await
}

async fn transition(
    state: &AppState,
    id: Uuid,
    next: RequestStatus,
    action: &'static str,
) -> Result<Json<RequestView>, AppError> {
    let request = simulated::run(state, action, state.delays.action, || {
        state.store.transition_request(id, next, Utc::now())
    })
    .await?;

    Ok(Json(request.into()))
}

async fn flag_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FlagRequest>,
) -> Result<Json<RequestView>, AppError> {
    let reason = payload.reason.trim();
    if reason.is_empty() {
        return Err(AppError::BadRequest("flag reason cannot be empty".to_string()));
    }

    let request = state
        .store
        .set_flag(id, Some(reason.to_string()), Utc::now())?;
    Ok(Json(request.into()))
}

async fn unflag_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    let request = state.store.set_flag(id, None, Utc::now())?;
    Ok(Json(request.into()))
}

async fn assign_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = assignment::assign(&state, id, payload.shopkeeper_id, Utc::now())?;
    Ok(Json(assignment))
}

async fn auto_assign_request(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Assignment>, AppError> {
    assignment::auto_assign(&state, id, Utc::now())?
        .map(Json)
        .ok_or(AppError::NoEligibleShopkeeper)
}

async fn list_assignments(State(state): State<Arc<AppState>>) -> Json<Vec<Assignment>> {
    Json(state.store.assignments())
}

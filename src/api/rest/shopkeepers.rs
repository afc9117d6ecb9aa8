use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::{assignment, rotation};
use crate::error::AppError;
use crate::filter::criteria::{availability, shopkeeper_search, ShopkeeperSort};
use crate::filter::Filter;
use crate::models::shopkeeper::{Availability, Shopkeeper};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shopkeepers", get(list_shopkeepers))
        .route("/shopkeepers/rotation", get(rotation_view))
        .route("/shopkeepers/:id", get(get_shopkeeper))
        .route("/shopkeepers/:id/availability", patch(update_availability))
}

#[derive(Debug, Default, Deserialize)]
pub struct ShopkeeperQuery {
    pub search: Option<String>,
    pub availability: Option<Availability>,
    #[serde(default)]
    pub sort: ShopkeeperSort,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub availability: Availability,
}

#[derive(Serialize)]
pub struct RotationView {
    /// Who auto-assign would pick right now, if anyone.
    pub next_auto_assignee: Option<Uuid>,
    pub queue: Vec<Shopkeeper>,
}

async fn list_shopkeepers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ShopkeeperQuery>,
) -> Json<Vec<Shopkeeper>> {
    let filter = Filter::new()
        .with_opt(shopkeeper_search(query.search.as_deref()))
        .with_opt(query.availability.map(availability));

    let mut shopkeepers = filter.apply(state.store.shopkeepers());
    query.sort.apply(&mut shopkeepers);
    Json(shopkeepers)
}

async fn rotation_view(State(state): State<Arc<AppState>>) -> Json<RotationView> {
    let queue = assignment::rotation_queue(&state);
    let available: Vec<Shopkeeper> = queue
        .iter()
        .filter(|shopkeeper| shopkeeper.is_auto_assignable())
        .cloned()
        .collect();

    Json(RotationView {
        next_auto_assignee: rotation::recommend(&available).map(|shopkeeper| shopkeeper.id),
        queue,
    })
}

async fn get_shopkeeper(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Shopkeeper>, AppError> {
    Ok(Json(state.store.shopkeeper(id)?))
}

async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Shopkeeper>, AppError> {
    let shopkeeper = state.store.set_availability(id, payload.availability)?;
    info!(shopkeeper_id = %id, availability = ?payload.availability, "availability updated");
    Ok(Json(shopkeeper))
}

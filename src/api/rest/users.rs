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
use crate::filter::criteria::{user_role, user_search, user_status};
use crate::filter::page::{paginate, Page};
use crate::filter::Filter;
use crate::models::user::{AccountStatus, ModerationAction, User, UserRole};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/export", get(export_users))
        .route("/users/:id", get(get_user).delete(delete_user))
        .route("/users/:id/approve", post(approve_user))
        .route("/users/:id/block", post(block_user))
        .route("/users/:id/unblock", post(unblock_user))
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<AccountStatus>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl UserQuery {
    fn filter(&self) -> Filter<User> {
        Filter::new()
            .with_opt(user_search(self.search.as_deref()))
            .with_opt(self.role.map(user_role))
            .with_opt(self.status.map(user_status))
    }
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Json<Page<User>> {
    let users = query.filter().apply(state.store.users());
    Json(paginate(users, query.page, query.per_page))
}

async fn export_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> Result<Response, AppError> {
    let users = query.filter().apply(state.store.users());
    csv_download(&state, "users", users).await
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.store.user(id)?))
}

async fn approve_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    moderate(&state, id, ModerationAction::Approve).await
}

async fn block_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    moderate(&state, id, ModerationAction::Block).await
}

async fn unblock_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    moderate(&state, id, ModerationAction::Unblock).await
}

async fn moderate(
    state: &AppState,
    id: Uuid,
    action: ModerationAction,
) -> Result<Json<User>, AppError> {
    let user = simulated::run(state, action.as_str(), state.delays.action, || {
        state.store.moderate_user(id, action)
    })
    .await?;

    Ok(Json(user))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = simulated::run(&state, "delete", state.delays.action, || {
        state.store.delete_user(id)
    })
    .await?;

    if user.role == UserRole::Shopkeeper {
        // absent until the shopkeeper's first assignment
        let _ = state
            .metrics
            .shopkeeper_assignments
            .remove_label_values(&[&id.to_string()]);
    }

    Ok(Json(user))
}

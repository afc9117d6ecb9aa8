pub mod dashboard;
pub mod feedback;
pub mod requests;
pub mod shopkeepers;
pub mod transactions;
pub mod users;
pub mod ws;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::engine::simulated;
use crate::error::AppError;
use crate::export::{self, CsvExport, CsvRecord};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(dashboard::router())
        .merge(users::router())
        .merge(shopkeepers::router())
        .merge(requests::router())
        .merge(transactions::router())
        .merge(feedback::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    users: usize,
    shopkeepers: usize,
    requests: usize,
    transactions: usize,
    feedback: usize,
    assignments: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let counts = state.store.counts();
    Json(HealthResponse {
        status: "ok",
        users: counts.users,
        shopkeepers: counts.shopkeepers,
        requests: counts.requests,
        transactions: counts.transactions,
        feedback: counts.feedback,
        assignments: counts.assignments,
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}

/// Builds a dated CSV download from already-filtered records.
pub(crate) async fn csv_download<T: CsvRecord>(
    state: &AppState,
    kind: &'static str,
    records: Vec<T>,
) -> Result<Response, AppError> {
    let today = Utc::now().date_naive();
    let file = simulated::run(state, "export", state.delays.action, || {
        export::export(&records, today)
    })
    .await?;

    state.metrics.exports_total.with_label_values(&[kind]).inc();
    info!(kind, rows = file.rows, filename = %file.filename, "csv exported");

    Ok(csv_response(file))
}

fn csv_response(file: CsvExport) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.body,
    )
        .into_response()
}

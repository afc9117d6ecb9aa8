use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;

use crate::api::rest::csv_download;
use crate::error::AppError;
use crate::filter::criteria::{created_within, transaction_search, transaction_status, DateWindow};
use crate::filter::page::{paginate, Page};
use crate::filter::Filter;
use crate::models::transaction::{Transaction, TransactionStatus};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions/export", get(export_transactions))
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionQuery {
    pub search: Option<String>,
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub date: DateWindow,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl TransactionQuery {
    fn filter(&self) -> Filter<Transaction> {
        Filter::new()
            .with_opt(transaction_search(self.search.as_deref()))
            .with_opt(self.status.map(transaction_status))
            .with(created_within(self.date, Utc::now()))
    }
}

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionQuery>,
) -> Json<Page<Transaction>> {
    let transactions = query.filter().apply(state.store.transactions());
    Json(paginate(transactions, query.page, query.per_page))
}

async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TransactionQuery>,
) -> Result<Response, AppError> {
    let transactions = query.filter().apply(state.store.transactions());
    csv_download(&state, "transactions", transactions).await
}

//! Customer listing handler

use std::sync::Arc;

use axum::extract::{Query, State};
use serde::Deserialize;
use utoipa::IntoParams;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use crate::store::models::CustomerSummary;
use crate::store::queries;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CustomerParams {
    /// Case-insensitive substring filter over name and email
    pub query: Option<String>,
}

/// Filtered customer list with per-customer invoice totals
///
/// GET /dashboard/customers?query=
#[utoipa::path(
    get,
    path = "/dashboard/customers",
    params(CustomerParams),
    responses(
        (status = 200, description = "Customer table rows", body = [CustomerSummary], content_type = "application/json"),
        (status = 303, description = "No valid session, redirect to login"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Customers"
)]
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerParams>,
) -> ApiResult<Vec<CustomerSummary>> {
    let query = params.query.unwrap_or_default();

    match queries::fetch_filtered_customers(state.pool(), &query).await {
        Ok(customers) => ok(customers),
        Err(e) => ApiError::db_error(e.to_string()).into_err(),
    }
}

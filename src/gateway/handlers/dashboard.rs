//! Dashboard overview handler

use std::sync::Arc;

use axum::extract::State;
use serde::Serialize;
use utoipa::ToSchema;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use crate::store::models::{CardData, LatestInvoice, Revenue};
use crate::store::queries;

/// Everything the dashboard overview page renders
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardData {
    pub cards: CardData,
    pub revenue: Vec<Revenue>,
    pub latest_invoices: Vec<LatestInvoice>,
}

/// Dashboard overview: summary cards, revenue chart data, latest invoices
///
/// GET /dashboard
///
/// The three fetches are independent and jointly awaited; the card query
/// itself fans out into its three counts.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Dashboard overview data", body = DashboardData, content_type = "application/json"),
        (status = 303, description = "No valid session, redirect to login"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Dashboard"
)]
pub async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<DashboardData> {
    let pool = state.pool();

    match tokio::try_join!(
        queries::fetch_card_data(pool),
        queries::fetch_revenue(pool),
        queries::fetch_latest_invoices(pool),
    ) {
        Ok((cards, revenue, latest_invoices)) => ok(DashboardData {
            cards,
            revenue,
            latest_invoices,
        }),
        Err(e) => ApiError::db_error(e.to_string()).into_err(),
    }
}

//! Diagnostic and seeding endpoints

use std::sync::Arc;

use axum::extract::State;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, ok};
use crate::store::models::SampleRow;
use crate::store::queries;

/// Small JSON sample: five invoice amounts joined with customer names
///
/// GET /query
#[utoipa::path(
    get,
    path = "/query",
    responses(
        (status = 200, description = "Sample rows", body = [SampleRow], content_type = "application/json"),
        (status = 500, description = "Database error")
    ),
    tag = "System"
)]
pub async fn sample_query(State(state): State<Arc<AppState>>) -> ApiResult<Vec<SampleRow>> {
    match queries::fetch_invoice_sample(state.pool()).await {
        Ok(rows) => ok(rows),
        Err(e) => ApiError::db_error(e.to_string()).into_err(),
    }
}

/// Drop, recreate and seed the database.
///
/// GET /seed
///
/// [SECURITY] Destructive. Only compiled when the `seed-api` feature is
/// enabled; production builds MUST use `--no-default-features`.
#[cfg(feature = "seed-api")]
#[utoipa::path(
    get,
    path = "/seed",
    responses(
        (status = 200, description = "Database seeded", body = crate::store::seed::SeedSummary, content_type = "application/json"),
        (status = 500, description = "Seeding failed")
    ),
    tag = "System"
)]
pub async fn run_seed(
    State(state): State<Arc<AppState>>,
) -> ApiResult<crate::store::seed::SeedSummary> {
    match crate::store::seed::run(state.pool()).await {
        Ok(summary) => ok(summary),
        Err(e) => {
            tracing::error!("SEED ERROR: {e:#}");
            ApiError::internal("Failed to seed database.").into_err()
        }
    }
}

//! Invoice listing, lookup and mutation handlers

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResponse, ApiResult, error_codes, ok};
use crate::store::models::{CustomerField, InvoiceForm, InvoiceRow};
use crate::store::mutations::{self, FieldErrors, InvoicePayload, MutationOutcome};
use crate::store::queries;

/// Query parameters of the invoices list
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListParams {
    /// Case-insensitive substring filter
    pub query: Option<String>,
    /// 1-based page number
    pub page: Option<u32>,
}

/// One page of the invoices table plus pagination metadata
#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceListData {
    pub invoices: Vec<InvoiceRow>,
    pub total_pages: u64,
    /// Revision of this view; moves whenever a mutation invalidates it
    pub revision: u64,
}

/// Data backing the edit form: the invoice plus the customer select list
#[derive(Debug, Serialize, ToSchema)]
pub struct InvoiceEditData {
    pub invoice: InvoiceForm,
    pub customers: Vec<CustomerField>,
}

/// Paginated, filtered invoices list
///
/// GET /dashboard/invoices?query=&page=
#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    params(ListParams),
    responses(
        (status = 200, description = "One page of invoices", body = InvoiceListData, content_type = "application/json"),
        (status = 303, description = "No valid session, redirect to login"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Invoices"
)]
pub async fn list_invoices(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> ApiResult<InvoiceListData> {
    let query = params.query.unwrap_or_default();
    let page = params.page.unwrap_or(1);
    let pool = state.pool();

    match tokio::try_join!(
        queries::fetch_filtered_invoices(pool, &query, page),
        queries::fetch_invoices_pages(pool, &query),
    ) {
        Ok((invoices, total_pages)) => ok(InvoiceListData {
            invoices,
            total_pages,
            revision: state.views.invoices_rev(),
        }),
        Err(e) => ApiError::db_error(e.to_string()).into_err(),
    }
}

/// Single invoice shaped for the edit form, with the customer select list
///
/// GET /dashboard/invoices/{id}
#[utoipa::path(
    get,
    path = "/dashboard/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    responses(
        (status = 200, description = "Invoice edit data", body = InvoiceEditData, content_type = "application/json"),
        (status = 404, description = "Invoice not found"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Invoices"
)]
pub async fn get_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<InvoiceEditData> {
    let pool = state.pool();

    match tokio::try_join!(
        queries::fetch_invoice_by_id(pool, id),
        queries::fetch_customers(pool),
    ) {
        Ok((Some(invoice), customers)) => ok(InvoiceEditData { invoice, customers }),
        Ok((None, _)) => ApiError::not_found("Invoice not found").into_err(),
        Err(e) => ApiError::db_error(e.to_string()).into_err(),
    }
}

/// Translate a mutation outcome into the HTTP reply. Navigation and cache
/// invalidation happen here, explicitly, never via a thrown signal.
fn mutation_response(state: &AppState, outcome: MutationOutcome) -> Response {
    match outcome {
        MutationOutcome::Invalid { message, errors } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<FieldErrors> {
                code: error_codes::VALIDATION_FAILED,
                msg: message.to_string(),
                data: Some(errors),
            }),
        )
            .into_response(),
        MutationOutcome::Failed { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(error_codes::DB_ERROR, message)),
        )
            .into_response(),
        MutationOutcome::Completed {
            revalidate,
            redirect,
        } => {
            let revision = state.views.invalidate_invoices();
            tracing::debug!(view = revalidate, revision, "view marked stale");
            Redirect::to(redirect).into_response()
        }
    }
}

/// Create an invoice from a submitted form
///
/// POST /dashboard/invoices
#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoicePayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirect to the invoices list"),
        (status = 422, description = "Validation failed; field errors in data"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<InvoicePayload>,
) -> Response {
    let outcome = mutations::create_invoice(state.pool(), &payload).await;
    mutation_response(&state, outcome)
}

/// Update an invoice from a submitted form
///
/// POST /dashboard/invoices/{id}
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    request_body(content = InvoicePayload, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirect to the invoices list"),
        (status = 422, description = "Validation failed; field errors in data"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Invoices"
)]
pub async fn update_invoice(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(payload): Form<InvoicePayload>,
) -> Response {
    let outcome = mutations::update_invoice(state.pool(), id, &payload).await;
    mutation_response(&state, outcome)
}

/// Delete an invoice
///
/// POST /dashboard/invoices/{id}/delete
#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}/delete",
    params(("id" = Uuid, Path, description = "Invoice ID")),
    responses(
        (status = 303, description = "Deleted (or already absent); redirect to the invoices list"),
        (status = 500, description = "Database error")
    ),
    security(("session_cookie" = [])),
    tag = "Invoices"
)]
pub async fn delete_invoice(State(state): State<Arc<AppState>>, Path(id): Path<Uuid>) -> Response {
    let outcome = mutations::delete_invoice(state.pool(), id).await;
    mutation_response(&state, outcome)
}

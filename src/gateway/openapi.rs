//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:3000/docs`
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::service::LoginForm;
use crate::gateway::handlers::HealthResponse;
use crate::gateway::handlers::dashboard::DashboardData;
use crate::gateway::handlers::invoices::{InvoiceEditData, InvoiceListData};
use crate::store::models::{
    CardData, CustomerField, CustomerSummary, InvoiceForm, InvoiceRow, LatestInvoice, Revenue,
    SampleRow,
};
use crate::store::mutations::{FieldErrors, InvoicePayload};

/// Session-cookie authentication security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "Signed session token (HS256 JWT) issued by POST /login. \
                     Requests to /dashboard paths without a valid token are \
                     redirected to /login.",
                ))),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Acme Dashboard API",
        version = "0.1.0",
        description = "Server-rendered admin dashboard backend: invoices, customers and revenue.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::admin::sample_query,
        crate::auth::handlers::login_page,
        crate::auth::handlers::login,
        crate::auth::handlers::logout,
        crate::gateway::handlers::dashboard::overview,
        crate::gateway::handlers::invoices::list_invoices,
        crate::gateway::handlers::invoices::get_invoice,
        crate::gateway::handlers::invoices::create_invoice,
        crate::gateway::handlers::invoices::update_invoice,
        crate::gateway::handlers::invoices::delete_invoice,
        crate::gateway::handlers::customers::list_customers,
    ),
    components(
        schemas(
            HealthResponse,
            DashboardData,
            CardData,
            Revenue,
            LatestInvoice,
            InvoiceRow,
            InvoiceListData,
            InvoiceEditData,
            InvoiceForm,
            CustomerField,
            CustomerSummary,
            SampleRow,
            InvoicePayload,
            FieldErrors,
            LoginForm,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Dashboard", description = "Overview aggregates (auth required)"),
        (name = "Invoices", description = "Invoice listing, lookup and form mutations (auth required)"),
        (name = "Customers", description = "Customer table (auth required)"),
        (name = "Auth", description = "Login and logout"),
        (name = "System", description = "Health checks and diagnostics")
    )
)]
pub struct ApiDoc;

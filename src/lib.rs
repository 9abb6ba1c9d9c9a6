//! Acme Dashboard - invoices, customers and revenue over PostgreSQL
//!
//! A server-rendered admin dashboard backend. The presentation layer is an
//! external collaborator; this crate answers with page data as JSON and
//! performs the authorization and redirect decisions.
//!
//! # Modules
//!
//! - [`config`] - YAML application configuration
//! - [`logging`] - tracing initialization (file + stdout)
//! - [`money`] - integer-cents boundary and currency formatting
//! - [`auth`] - credential verification, session tokens, per-request gate
//! - [`store`] - connection pool, row models, queries, mutations, seeding
//! - [`gateway`] - axum router, shared state, response envelope, OpenAPI

pub mod auth;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod money;
pub mod store;

// Convenient re-exports at crate root
pub use auth::{Access, AuthService, Claims, SessionUser, authorize};
pub use config::AppConfig;
pub use store::{
    Database, FieldErrors, InvoicePayload, InvoiceStatus, MutationOutcome, NewInvoice, StoreError,
};

//! Persistence: connection pool, row models, data access and mutations

pub mod db;
pub mod models;
pub mod mutations;
pub mod queries;
pub mod seed;

pub use db::Database;
pub use models::{
    CardData, CustomerField, CustomerSummary, InvoiceForm, InvoiceRow, InvoiceStatus,
    LatestInvoice, Revenue, SampleRow, User,
};
pub use mutations::{FieldErrors, InvoicePayload, MutationOutcome, NewInvoice};
pub use queries::{ITEMS_PER_PAGE, StoreError};

//! HTTP handlers

pub mod admin;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod invoices;

pub use health::{HealthResponse, health_check};

//! Row types and response shapes for the dashboard data

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::money;

// ============================================================================
// Invoice status
// ============================================================================

/// Invoice status: exactly two values, guarded at the mutation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("Unknown invoice status: '{0}'")]
pub struct UnknownStatus(pub String);

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// User account row. The password column holds an argon2 PHC hash and the
/// struct is intentionally not serializable.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}

// ============================================================================
// Query-shaped rows
// ============================================================================

/// Customer select-field entry (id + name) for invoice forms
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, FromRow)]
pub struct LatestInvoiceRaw {
    pub id: Uuid,
    pub amount: i32,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Most recent invoice joined with customer identity, amount pre-formatted
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    /// Formatted currency, e.g. `$1,234.56`
    #[schema(example = "$157.95")]
    pub amount: String,
}

impl From<LatestInvoiceRaw> for LatestInvoice {
    fn from(raw: LatestInvoiceRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            image_url: raw.image_url,
            amount: money::format_currency(raw.amount as i64),
        }
    }
}

/// One row of the paginated invoices table
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InvoiceRow {
    pub id: Uuid,
    /// Integer cents
    pub amount: i32,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

#[derive(Debug, FromRow)]
pub struct InvoiceFormRaw {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
}

/// Single invoice shaped for the edit form: amount in decimal dollars
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Decimal dollars (cents / 100)
    #[schema(value_type = String, example = "157.95")]
    pub amount: Decimal,
    pub status: String,
}

impl From<InvoiceFormRaw> for InvoiceForm {
    fn from(raw: InvoiceFormRaw) -> Self {
        Self {
            id: raw.id,
            customer_id: raw.customer_id,
            amount: money::from_cents(raw.amount as i64),
            status: raw.status,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct CustomerSummaryRaw {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer list row with aggregated per-customer totals
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    #[schema(example = "$250.00")]
    pub total_pending: String,
    #[schema(example = "$1,230.00")]
    pub total_paid: String,
}

impl From<CustomerSummaryRaw> for CustomerSummary {
    fn from(raw: CustomerSummaryRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            image_url: raw.image_url,
            total_invoices: raw.total_invoices,
            total_pending: money::format_currency(raw.total_pending),
            total_paid: money::format_currency(raw.total_paid),
        }
    }
}

/// Dashboard summary cards
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CardData {
    pub number_of_invoices: i64,
    pub number_of_customers: i64,
    #[schema(example = "$1,052.46")]
    pub total_paid: String,
    #[schema(example = "$750.11")]
    pub total_pending: String,
}

/// Diagnostic sample row (invoice amount + customer name)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SampleRow {
    pub amount: i32,
    pub name: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_valid() {
        assert_eq!("pending".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Pending));
        assert_eq!("paid".parse::<InvoiceStatus>(), Ok(InvoiceStatus::Paid));
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert!("open".parse::<InvoiceStatus>().is_err());
        assert!("PAID".parse::<InvoiceStatus>().is_err()); // case-sensitive
        assert!("".parse::<InvoiceStatus>().is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in [InvoiceStatus::Pending, InvoiceStatus::Paid] {
            assert_eq!(status.to_string().parse::<InvoiceStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_latest_invoice_formats_amount() {
        let raw = LatestInvoiceRaw {
            id: Uuid::nil(),
            amount: 15795,
            name: "Evil Rabbit".to_string(),
            email: "evil@rabbit.com".to_string(),
            image_url: "/customers/evil-rabbit.png".to_string(),
        };
        let latest = LatestInvoice::from(raw);
        assert_eq!(latest.amount, "$157.95");
    }

    #[test]
    fn test_invoice_form_converts_to_dollars() {
        let raw = InvoiceFormRaw {
            id: Uuid::nil(),
            customer_id: Uuid::nil(),
            amount: 66666,
            status: "pending".to_string(),
        };
        let form = InvoiceForm::from(raw);
        assert_eq!(form.amount.to_string(), "666.66");
    }

    #[test]
    fn test_customer_summary_formats_totals() {
        let raw = CustomerSummaryRaw {
            id: Uuid::nil(),
            name: "Delba de Oliveira".to_string(),
            email: "delba@oliveira.com".to_string(),
            image_url: "/customers/delba-de-oliveira.png".to_string(),
            total_invoices: 2,
            total_pending: 125000,
            total_paid: 850,
        };
        let summary = CustomerSummary::from(raw);
        assert_eq!(summary.total_pending, "$1,250.00");
        assert_eq!(summary.total_paid, "$8.50");
    }
}

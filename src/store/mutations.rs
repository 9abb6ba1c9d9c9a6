//! Form validation and mutation orchestration for invoices
//!
//! Each submission moves Received -> Validated -> {Invalid | Failed |
//! Completed}. Validation failures never reach the database; completed
//! mutations name the view to mark stale and the location the caller should
//! navigate to.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeMap;
use utoipa::ToSchema;
use uuid::Uuid;

use super::models::InvoiceStatus;
use super::queries;
use crate::money;

/// Path of the invoices list view; mutations mark it stale and redirect here.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

// ============================================================================
// Input and validation
// ============================================================================

/// Raw invoice form fields as submitted. Everything is optional text; the
/// schema check produces the typed [`NewInvoice`].
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct InvoicePayload {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Validated invoice ready for persistence
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub customer_id: Uuid,
    /// Integer cents, rounded from the submitted decimal amount
    pub amount_cents: i32,
    pub status: InvoiceStatus,
}

/// Field name -> list of human-readable messages
#[derive(Debug, Default, Serialize, PartialEq, ToSchema)]
#[schema(value_type = std::collections::BTreeMap<String, Vec<String>>)]
pub struct FieldErrors(
    pub BTreeMap<&'static str, Vec<String>>,
);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Schema-check a submitted payload.
///
/// Rules: customer id present and a well-formed UUID; amount coercible to a
/// decimal, greater than zero and within the integer-cents column range;
/// status one of the two allowed values. All failing fields are reported
/// together.
pub fn validate_invoice(payload: &InvoicePayload) -> Result<NewInvoice, FieldErrors> {
    let mut errors = FieldErrors::default();

    let customer_id = match payload.customer_id.as_deref().filter(|s| !s.is_empty()) {
        None => {
            errors.push("customer_id", "Please select a customer.");
            None
        }
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push("customer_id", "Please select a valid customer.");
                None
            }
        },
    };

    let amount_cents = match payload.amount.as_deref().filter(|s| !s.is_empty()) {
        None => {
            errors.push("amount", "Please enter an amount.");
            None
        }
        Some(raw) => match money::parse_amount(raw) {
            Err(_) => {
                errors.push("amount", "Please enter a valid amount.");
                None
            }
            Ok(amount) => match money::to_cents(amount) {
                Ok(cents) => Some(cents as i32),
                Err(money::MoneyError::InvalidAmount) => {
                    errors.push("amount", "Please enter an amount greater than $0.");
                    None
                }
                Err(_) => {
                    errors.push("amount", "Please enter a valid amount.");
                    None
                }
            },
        },
    };

    let status = match payload.status.as_deref().filter(|s| !s.is_empty()) {
        None => {
            errors.push("status", "Please select an invoice status.");
            None
        }
        Some(raw) => match raw.parse::<InvoiceStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                errors.push("status", "Please select an invoice status.");
                None
            }
        },
    };

    match (customer_id, amount_cents, status) {
        (Some(customer_id), Some(amount_cents), Some(status)) => Ok(NewInvoice {
            customer_id,
            amount_cents,
            status,
        }),
        _ => Err(errors),
    }
}

// ============================================================================
// Tagged mutation outcome
// ============================================================================

/// Result of a mutation attempt. The caller performs the navigation and the
/// cache invalidation explicitly; nothing here throws to signal success.
#[derive(Debug)]
pub enum MutationOutcome {
    /// Schema check failed; no database call was made
    Invalid {
        message: &'static str,
        errors: FieldErrors,
    },
    /// The write failed; the message is generic, detail is in the logs
    Failed { message: String },
    /// The write succeeded: mark `revalidate` stale and navigate to `redirect`
    Completed {
        revalidate: &'static str,
        redirect: &'static str,
    },
}

fn completed() -> MutationOutcome {
    MutationOutcome::Completed {
        revalidate: INVOICES_PATH,
        redirect: INVOICES_PATH,
    }
}

/// Validate and insert a new invoice
pub async fn create_invoice(pool: &PgPool, payload: &InvoicePayload) -> MutationOutcome {
    let invoice = match validate_invoice(payload) {
        Ok(invoice) => invoice,
        Err(errors) => {
            return MutationOutcome::Invalid {
                message: "Missing Fields. Failed to Create Invoice.",
                errors,
            };
        }
    };

    match queries::insert_invoice(pool, &invoice).await {
        Ok(()) => completed(),
        Err(e) => MutationOutcome::Failed {
            message: e.to_string(),
        },
    }
}

/// Validate and update an existing invoice
pub async fn update_invoice(pool: &PgPool, id: Uuid, payload: &InvoicePayload) -> MutationOutcome {
    let invoice = match validate_invoice(payload) {
        Ok(invoice) => invoice,
        Err(errors) => {
            return MutationOutcome::Invalid {
                message: "Missing Fields. Failed to Update Invoice.",
                errors,
            };
        }
    };

    match queries::update_invoice(pool, id, &invoice).await {
        Ok(()) => completed(),
        Err(e) => MutationOutcome::Failed {
            message: e.to_string(),
        },
    }
}

/// Delete an invoice. Single-step: no validation beyond the typed id, a
/// missing row is not an error.
pub async fn delete_invoice(pool: &PgPool, id: Uuid) -> MutationOutcome {
    match queries::delete_invoice(pool, id).await {
        Ok(affected) => {
            if affected == 0 {
                tracing::debug!(%id, "delete affected no rows");
            }
            completed()
        }
        Err(e) => MutationOutcome::Failed {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(customer_id: &str, amount: &str, status: &str) -> InvoicePayload {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        InvoicePayload {
            customer_id: opt(customer_id),
            amount: opt(amount),
            status: opt(status),
        }
    }

    const CUSTOMER: &str = "3958dc9e-712f-4377-85e9-fec4b6a6442a";

    #[test]
    fn test_validate_accepts_well_formed_payload() {
        let invoice = validate_invoice(&payload(CUSTOMER, "157.95", "pending")).unwrap();
        assert_eq!(invoice.amount_cents, 15795);
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.customer_id.to_string(), CUSTOMER);
    }

    #[test]
    fn test_validate_rounds_to_nearest_cent() {
        let invoice = validate_invoice(&payload(CUSTOMER, "12.345", "paid")).unwrap();
        assert_eq!(invoice.amount_cents, 1235);

        let invoice = validate_invoice(&payload(CUSTOMER, "12.344", "paid")).unwrap();
        assert_eq!(invoice.amount_cents, 1234);
    }

    #[test]
    fn test_validate_missing_customer() {
        let errors = validate_invoice(&payload("", "10.00", "paid")).unwrap_err();
        assert_eq!(
            errors.0.get("customer_id").unwrap(),
            &vec!["Please select a customer.".to_string()]
        );
        assert!(!errors.0.contains_key("amount"));
        assert!(!errors.0.contains_key("status"));
    }

    #[test]
    fn test_validate_malformed_customer_id() {
        let errors = validate_invoice(&payload("not-a-uuid", "10.00", "paid")).unwrap_err();
        assert_eq!(
            errors.0.get("customer_id").unwrap(),
            &vec!["Please select a valid customer.".to_string()]
        );
    }

    #[test]
    fn test_validate_non_positive_amount() {
        for bad in ["0", "0.00", "-5", "-0.01"] {
            let errors = validate_invoice(&payload(CUSTOMER, bad, "paid")).unwrap_err();
            assert_eq!(
                errors.0.get("amount").unwrap(),
                &vec!["Please enter an amount greater than $0.".to_string()],
                "amount {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_non_numeric_amount() {
        for bad in ["abc", "1.2.3", ".5", "1e3"] {
            let errors = validate_invoice(&payload(CUSTOMER, bad, "paid")).unwrap_err();
            assert_eq!(
                errors.0.get("amount").unwrap(),
                &vec!["Please enter a valid amount.".to_string()],
                "amount {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_amount_exceeding_column_range() {
        let errors = validate_invoice(&payload(CUSTOMER, "99999999999", "paid")).unwrap_err();
        assert_eq!(
            errors.0.get("amount").unwrap(),
            &vec!["Please enter a valid amount.".to_string()]
        );
    }

    #[test]
    fn test_validate_unknown_status() {
        for bad in ["", "open", "Paid", "PENDING"] {
            let errors = validate_invoice(&payload(CUSTOMER, "10.00", bad)).unwrap_err();
            assert_eq!(
                errors.0.get("status").unwrap(),
                &vec!["Please select an invoice status.".to_string()],
                "status {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_reports_all_failing_fields() {
        let errors = validate_invoice(&InvoicePayload::default()).unwrap_err();
        assert_eq!(errors.0.len(), 3);
        assert!(errors.0.contains_key("customer_id"));
        assert!(errors.0.contains_key("amount"));
        assert!(errors.0.contains_key("status"));
    }

    #[test]
    fn test_field_errors_serialize_as_map() {
        let mut errors = FieldErrors::default();
        errors.push("amount", "Please enter a valid amount.");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"amount": ["Please enter a valid amount."]})
        );
    }
}

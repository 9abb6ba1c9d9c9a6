use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sqlx::PgPool;

use crate::auth::AuthService;
use crate::store::Database;

/// Shared application state, explicitly constructed at startup and handed to
/// every handler. No module-level database client exists.
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub views: ViewStamps,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self {
            db,
            auth,
            views: ViewStamps::default(),
        }
    }

    pub fn pool(&self) -> &PgPool {
        self.db.pool()
    }
}

/// Monotonic revision stamps for rendered views.
///
/// Reads always re-query the store; the stamp is the cache-invalidation
/// signal for external renderers, which compare it against the revision of
/// their cached copy and re-fetch when it moved.
#[derive(Default)]
pub struct ViewStamps {
    invoices: AtomicU64,
}

impl ViewStamps {
    /// Current revision of the invoices list view
    pub fn invoices_rev(&self) -> u64 {
        self.invoices.load(Ordering::Relaxed)
    }

    /// Mark the invoices list view stale; returns the new revision
    pub fn invalidate_invoices(&self) -> u64 {
        self.invoices.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_stamps_start_at_zero() {
        let views = ViewStamps::default();
        assert_eq!(views.invoices_rev(), 0);
    }

    #[test]
    fn test_invalidation_is_monotonic() {
        let views = ViewStamps::default();
        assert_eq!(views.invalidate_invoices(), 1);
        assert_eq!(views.invalidate_invoices(), 2);
        assert_eq!(views.invoices_rev(), 2);
    }
}

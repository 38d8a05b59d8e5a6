//! # Order Age
//!
//! Derived, never-persisted attributes of a pending order: how many days
//! it has been outstanding, and whether that makes it overdue.
//!
//! Both values are recomputed on every read against a caller-supplied
//! `today`, so the functions stay deterministic and testable without a
//! clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::PendingOrder;

/// Days outstanding at which a still-pending order is flagged overdue.
pub const OVERDUE_THRESHOLD_DAYS: i64 = 7;

// =============================================================================
// Age Computation
// =============================================================================

/// Days between the order's creation date and `today`, at day granularity.
///
/// Time-of-day is discarded on both sides. An order created in the future
/// (clock skew on the machine that wrote it) yields a negative age; the
/// value is reported as-is, never clamped.
pub fn compute_age(order: &PendingOrder, today: NaiveDate) -> i64 {
    (today - order.fecha_creacion.date_naive()).num_days()
}

/// Whether the order should raise the overdue alert.
///
/// True exactly when the age is at least [`OVERDUE_THRESHOLD_DAYS`] and the
/// status is still Pending. Status comparison is effectively
/// case-insensitive: any spelling of "pending" accepted by the status
/// parser lands on the same variant.
pub fn is_overdue(order: &PendingOrder, today: NaiveDate) -> bool {
    compute_age(order, today) >= OVERDUE_THRESHOLD_DAYS && order.estado.is_pending()
}

// =============================================================================
// Aged Read Model
// =============================================================================

/// A pending order annotated with its derived age fields.
///
/// What the listing view renders: the record plus `age_days` and the
/// `overdue` flag, computed at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgedOrder {
    pub order: PendingOrder,
    pub age_days: i64,
    pub overdue: bool,
}

impl AgedOrder {
    /// Annotates `order` with its age as of `today`.
    pub fn from_order(order: PendingOrder, today: NaiveDate) -> Self {
        let age_days = compute_age(&order, today);
        let overdue = is_overdue(&order, today);
        AgedOrder {
            order,
            age_days,
            overdue,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BillingType, OrderStatus};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn order_created_on(date: NaiveDate, estado: OrderStatus) -> PendingOrder {
        PendingOrder {
            id: "ord-1".to_string(),
            empresa: "ACME Corp".to_string(),
            rut_empresa: None,
            producto: "Clorador".to_string(),
            sku: None,
            cantidad: 1,
            proveedor: "Hidrotek".to_string(),
            tipo_facturacion: BillingType::Complete,
            orden_compra: None,
            fecha_nota_venta: date,
            n_nota_venta: None,
            fecha_entrega: None,
            estado,
            motivo: None,
            vendedor: "P. Rojas".to_string(),
            fecha_creacion: Utc
                .from_utc_datetime(&date.and_hms_opt(16, 45, 0).unwrap()),
        }
    }

    #[test]
    fn age_is_zero_on_the_creation_date() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);
        // Time-of-day on fecha_creacion is discarded.
        assert_eq!(compute_age(&order, date), 0);
    }

    #[test]
    fn age_counts_whole_days() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);
        let later = date + chrono::Days::new(10);
        assert_eq!(compute_age(&order, later), 10);
    }

    #[test]
    fn age_is_idempotent_for_a_fixed_today() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);
        let today = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();
        assert_eq!(compute_age(&order, today), compute_age(&order, today));
    }

    #[test]
    fn future_creation_date_yields_negative_age() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);
        let today = NaiveDate::from_ymd_opt(2025, 5, 7).unwrap();
        assert_eq!(compute_age(&order, today), -3);
        // Negative age can never trip the overdue alert.
        assert!(!is_overdue(&order, today));
    }

    #[test]
    fn overdue_requires_threshold_and_pending_status() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let today = date + chrono::Days::new(10);

        let pending = order_created_on(date, OrderStatus::Pending);
        assert!(is_overdue(&pending, today));

        let completed = order_created_on(date, OrderStatus::Completed);
        assert!(!is_overdue(&completed, today));

        let in_process = order_created_on(date, OrderStatus::InProcess);
        assert!(!is_overdue(&in_process, today));
    }

    #[test]
    fn overdue_boundary_is_inclusive() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);

        let day_six = date + chrono::Days::new(6);
        assert!(!is_overdue(&order, day_six));

        let day_seven = date + chrono::Days::new(OVERDUE_THRESHOLD_DAYS as u64);
        assert!(is_overdue(&order, day_seven));
    }

    #[test]
    fn aged_order_annotates_the_record() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        let order = order_created_on(date, OrderStatus::Pending);
        let today = date + chrono::Days::new(8);

        let aged = AgedOrder::from_order(order.clone(), today);
        assert_eq!(aged.age_days, 8);
        assert!(aged.overdue);
        assert_eq!(aged.order, order);
    }
}

//! # Order Lifecycle Service
//!
//! The operations the dashboard calls: create, edit, complete, list.
//! Sits between the presentation layer and the repository, running the
//! core validators before anything touches storage and stamping the
//! lifecycle rules the adapter itself does not enforce (status forced to
//! Pending on creation).
//!
//! One request, one operation, no shared mutable state: concurrent edits
//! of the same order race and the last write wins.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::error::DbError;
use crate::pool::Database;
use pendientes_core::{
    validation, AgedOrder, CompletedDelivery, OrderFields, OrderStatus, PendingOrder,
    ValidationError,
};

// =============================================================================
// Service Error
// =============================================================================

/// Errors surfaced to the presentation layer.
///
/// Three kinds, matching the three user-facing outcomes: fix the form
/// (Validation), the record is gone (NotFound), try again later (Store).
/// Nothing here is retried automatically; resubmitting the form is the
/// retry mechanism.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input rejected before any store call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The targeted order does not exist in the pending store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The store failed underneath a valid request.
    #[error(transparent)]
    Store(DbError),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            other => ServiceError::Store(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Order Service
// =============================================================================

/// Lifecycle operations over the order store.
#[derive(Debug, Clone)]
pub struct OrderService {
    db: Database,
}

impl OrderService {
    /// Creates a service on top of an open database handle.
    pub fn new(db: Database) -> Self {
        OrderService { db }
    }

    /// Registers a new pending order.
    ///
    /// Validates before any store call, then forces `estado = Pending`:
    /// whatever status the caller put in the fields is discarded. Returns
    /// the stored record including its assigned id and creation timestamp.
    pub async fn create(&self, mut fields: OrderFields) -> ServiceResult<PendingOrder> {
        validation::validate_fields(&fields)?;

        fields.estado = OrderStatus::Pending;

        let order = self.db.orders().insert(&fields).await?;
        info!(id = %order.id, empresa = %order.empresa, "Pending order created");
        Ok(order)
    }

    /// Overwrites the business fields of an existing order.
    ///
    /// Runs the same validation as [`create`], so the quantity invariant
    /// holds for the record's whole lifetime. The status supplied here is
    /// honored (moving an order to In Process is an edit), but `id` and
    /// `fecha_creacion` can never change.
    ///
    /// [`create`]: OrderService::create
    pub async fn edit(&self, id: &str, fields: OrderFields) -> ServiceResult<PendingOrder> {
        validation::validate_fields(&fields)?;

        let orders = self.db.orders();
        orders.update(id, &fields).await?;

        // Re-read so the caller sees exactly what the store now holds.
        let order = orders
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("PendingOrder", id))?;

        info!(id = %id, "Pending order edited");
        Ok(order)
    }

    /// Completes an order: one atomic transition copying it into the
    /// delivered store and removing it from the pending store.
    ///
    /// `fecha_entrega` defaults to today. A store failure part-way leaves
    /// both tables exactly as they were.
    pub async fn complete(
        &self,
        id: &str,
        fecha_entrega: Option<NaiveDate>,
    ) -> ServiceResult<CompletedDelivery> {
        let delivery = self.db.orders().complete(id, fecha_entrega).await?;
        info!(id = %id, fecha_entrega = %delivery.fecha_entrega, "Order completed");
        Ok(delivery)
    }

    /// All pending orders, newest first.
    pub async fn list_pending(&self) -> ServiceResult<Vec<PendingOrder>> {
        Ok(self.db.orders().list_pending().await?)
    }

    /// All completed deliveries, most recent delivery first.
    pub async fn list_completed(&self) -> ServiceResult<Vec<CompletedDelivery>> {
        Ok(self.db.orders().list_completed().await?)
    }

    /// Pending orders annotated with age and the overdue flag as of
    /// `today`. This is what the listing view renders; the derived fields
    /// are computed fresh on every call, never stored.
    pub async fn list_pending_aged(&self, today: NaiveDate) -> ServiceResult<Vec<AgedOrder>> {
        let orders = self.db.orders().list_pending().await?;
        Ok(orders
            .into_iter()
            .map(|order| AgedOrder::from_order(order, today))
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! Core domain types for the order tracker.
//!
//! ## Entity Lifecycle
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                                                                │
//! │  create ──► PendingOrder { estado: Pending }                   │
//! │                  │                                             │
//! │                  ├── edit ──► any field except id and          │
//! │                  │            fecha_creacion                   │
//! │                  │                                             │
//! │                  └── complete ──► CompletedDelivery            │
//! │                       (atomic: copy + delete, one transaction) │
//! │                                                                │
//! │  CompletedDelivery is terminal: written once, never mutated.   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names match the persisted Spanish column names (`empresa`,
//! `producto`, `cantidad`, ...) so the storage layer maps rows 1:1.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle status of a pending order.
///
/// Stored as text. Parsing is case-insensitive and accepts the Spanish
/// spellings found in rows written by earlier dashboard revisions
/// ("Pendiente", "En Proceso", "Completado"); the canonical English form
/// is always written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Promised to the client, not yet delivered.
    Pending,
    /// Being worked (supplier contacted, partial shipment, ...).
    InProcess,
    /// Delivered. Only ever observed in transit to the completed store.
    Completed,
}

impl OrderStatus {
    /// Canonical text persisted to the store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProcess => "In Process",
            OrderStatus::Completed => "Completed",
        }
    }

    /// True for the only status that counts toward the overdue alert.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    #[inline]
    pub const fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Ok(OrderStatus::Pending),
            "in process" | "in_process" | "en proceso" => Ok(OrderStatus::InProcess),
            "completed" | "completado" | "completada" => Ok(OrderStatus::Completed),
            _ => Err(CoreError::UnknownStatus(s.to_string())),
        }
    }
}

// =============================================================================
// Billing Type
// =============================================================================

/// How the order is invoiced on delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingType {
    /// Partial delivery with a dispatch receipt; invoiced when complete.
    PartialWithReceipt,
    /// Single complete delivery, invoiced at once.
    Complete,
}

impl BillingType {
    /// Canonical text persisted to the store.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BillingType::PartialWithReceipt => "partial-with-receipt",
            BillingType::Complete => "complete",
        }
    }
}

impl fmt::Display for BillingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "partial-with-receipt" | "partial with receipt" | "parcial" | "parcial con guia" => {
                Ok(BillingType::PartialWithReceipt)
            }
            "complete" | "completa" => Ok(BillingType::Complete),
            _ => Err(CoreError::UnknownBillingType(s.to_string())),
        }
    }
}

// =============================================================================
// Order Fields
// =============================================================================

/// Caller-supplied business fields of an order.
///
/// Everything the presentation layer collects in the form: the full record
/// minus the two store-assigned fields (`id`, `fecha_creacion`). Used both
/// to create an order and to overwrite one on edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderFields {
    /// Client name.
    pub empresa: String,

    /// Client tax id (RUT).
    pub rut_empresa: Option<String>,

    /// Product name.
    pub producto: String,

    /// Stock keeping unit, when the product has one.
    pub sku: Option<String>,

    /// Units still owed to the client. Always >= 1.
    pub cantidad: i64,

    /// Upstream supplier. May be empty when not yet sourced.
    pub proveedor: String,

    /// Invoicing mode on delivery.
    pub tipo_facturacion: BillingType,

    /// Client purchase-order number.
    pub orden_compra: Option<String>,

    /// Date on the sales note.
    pub fecha_nota_venta: NaiveDate,

    /// Sales-note number.
    pub n_nota_venta: Option<String>,

    /// Delivery date. Normally unset until completion.
    pub fecha_entrega: Option<NaiveDate>,

    /// Lifecycle status. Forced to `Pending` on creation.
    pub estado: OrderStatus,

    /// Free-text reason or comment.
    pub motivo: Option<String>,

    /// Salesperson who took the order. Free text, not an identity.
    pub vendedor: String,
}

// =============================================================================
// Pending Order
// =============================================================================

/// One outstanding commitment to deliver product to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingOrder {
    /// Unique identifier, assigned by the store at insert. Immutable.
    pub id: String,

    pub empresa: String,
    pub rut_empresa: Option<String>,
    pub producto: String,
    pub sku: Option<String>,
    pub cantidad: i64,
    pub proveedor: String,
    pub tipo_facturacion: BillingType,
    pub orden_compra: Option<String>,
    pub fecha_nota_venta: NaiveDate,
    pub n_nota_venta: Option<String>,
    pub fecha_entrega: Option<NaiveDate>,
    pub estado: OrderStatus,
    pub motivo: Option<String>,
    pub vendedor: String,

    /// Set once at insert, never updated.
    pub fecha_creacion: DateTime<Utc>,
}

impl PendingOrder {
    /// The caller-editable slice of this record.
    pub fn fields(&self) -> OrderFields {
        OrderFields {
            empresa: self.empresa.clone(),
            rut_empresa: self.rut_empresa.clone(),
            producto: self.producto.clone(),
            sku: self.sku.clone(),
            cantidad: self.cantidad,
            proveedor: self.proveedor.clone(),
            tipo_facturacion: self.tipo_facturacion,
            orden_compra: self.orden_compra.clone(),
            fecha_nota_venta: self.fecha_nota_venta,
            n_nota_venta: self.n_nota_venta.clone(),
            fecha_entrega: self.fecha_entrega,
            estado: self.estado,
            motivo: self.motivo.clone(),
            vendedor: self.vendedor.clone(),
        }
    }

    /// The terminal copy written by the completion transition.
    ///
    /// Carries `fecha_creacion` over unchanged; `fecha_entrega` is the
    /// completion date. The live `estado` field does not survive into the
    /// completed record.
    pub fn into_completed(self, fecha_entrega: NaiveDate) -> CompletedDelivery {
        CompletedDelivery {
            id: self.id,
            empresa: self.empresa,
            rut_empresa: self.rut_empresa,
            producto: self.producto,
            sku: self.sku,
            cantidad: self.cantidad,
            proveedor: self.proveedor,
            tipo_facturacion: self.tipo_facturacion,
            orden_compra: self.orden_compra,
            fecha_nota_venta: self.fecha_nota_venta,
            n_nota_venta: self.n_nota_venta,
            fecha_entrega,
            motivo: self.motivo,
            vendedor: self.vendedor,
            fecha_creacion: self.fecha_creacion,
        }
    }
}

// =============================================================================
// Completed Delivery
// =============================================================================

/// A fulfilled order: the terminal copy of a [`PendingOrder`].
///
/// Produced only by the completion transition, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedDelivery {
    /// Id of the pending order this record was copied from.
    pub id: String,

    pub empresa: String,
    pub rut_empresa: Option<String>,
    pub producto: String,
    pub sku: Option<String>,
    pub cantidad: i64,
    pub proveedor: String,
    pub tipo_facturacion: BillingType,
    pub orden_compra: Option<String>,
    pub fecha_nota_venta: NaiveDate,
    pub n_nota_venta: Option<String>,

    /// Completion date.
    pub fecha_entrega: NaiveDate,

    pub motivo: Option<String>,
    pub vendedor: String,

    /// Creation timestamp of the original pending order, not re-stamped.
    pub fecha_creacion: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> PendingOrder {
        PendingOrder {
            id: "ord-1".to_string(),
            empresa: "ACME Corp".to_string(),
            rut_empresa: Some("76.543.210-K".to_string()),
            producto: "Bomba centrífuga".to_string(),
            sku: Some("BC-200".to_string()),
            cantidad: 4,
            proveedor: "Hidrotek".to_string(),
            tipo_facturacion: BillingType::Complete,
            orden_compra: Some("OC-1042".to_string()),
            fecha_nota_venta: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            n_nota_venta: Some("NV-889".to_string()),
            fecha_entrega: None,
            estado: OrderStatus::Pending,
            motivo: None,
            vendedor: "P. Rojas".to_string(),
            fecha_creacion: "2025-03-10T14:30:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Pending".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!("pendiente".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert_eq!(
            "En Proceso".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProcess
        );
        assert_eq!(
            "completado".parse::<OrderStatus>().unwrap(),
            OrderStatus::Completed
        );
    }

    #[test]
    fn status_rejects_unknown_text() {
        let err = "delivered?".parse::<OrderStatus>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownStatus(_)));
    }

    #[test]
    fn status_round_trips_through_canonical_text() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::InProcess,
            OrderStatus::Completed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_default_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn billing_type_parses_legacy_spellings() {
        assert_eq!(
            "Parcial".parse::<BillingType>().unwrap(),
            BillingType::PartialWithReceipt
        );
        assert_eq!("completa".parse::<BillingType>().unwrap(), BillingType::Complete);
        assert!("monthly".parse::<BillingType>().is_err());
    }

    #[test]
    fn into_completed_carries_creation_timestamp() {
        let order = sample_order();
        let created = order.fecha_creacion;
        let delivered = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();

        let completed = order.into_completed(delivered);

        assert_eq!(completed.id, "ord-1");
        assert_eq!(completed.fecha_entrega, delivered);
        assert_eq!(completed.fecha_creacion, created);
        assert_eq!(completed.cantidad, 4);
    }

    #[test]
    fn fields_mirror_the_record() {
        let order = sample_order();
        let fields = order.fields();
        assert_eq!(fields.empresa, order.empresa);
        assert_eq!(fields.cantidad, order.cantidad);
        assert_eq!(fields.estado, order.estado);
        assert_eq!(fields.fecha_nota_venta, order.fecha_nota_venta);
    }

    #[test]
    fn order_serializes_for_the_presentation_layer() {
        let json = serde_json::to_value(sample_order()).unwrap();
        assert_eq!(json["empresa"], "ACME Corp");
        assert_eq!(json["estado"], "pending");
        assert_eq!(json["tipo_facturacion"], "complete");
        assert_eq!(json["fecha_nota_venta"], "2025-03-10");
    }
}

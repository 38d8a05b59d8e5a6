//! # pendientes-core: Pure Business Logic for the Order Tracker
//!
//! Domain types and rules behind the "Sistema de Pendientes" dashboard.
//! A pending order ("pendiente") is an item promised to a client but not
//! yet delivered; this crate models its lifecycle and the summaries the
//! dashboard renders.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Presentation layer (forms, tables, charts)                  │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │               ★ pendientes-core (THIS CRATE) ★               │
//! │                                                              │
//! │   ┌──────────┐  ┌────────────┐  ┌───────┐  ┌───────────┐    │
//! │   │  types   │  │ validation │  │  age  │  │ aggregate │    │
//! │   └──────────┘  └────────────┘  └───────┘  └───────────┘    │
//! │                                                              │
//! │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │  pendientes-db (SQLite queries, migrations, lifecycle)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (PendingOrder, CompletedDelivery, ...)
//! - [`error`] - Domain error types
//! - [`validation`] - Field validation run before any store call
//! - [`age`] - Order age and the overdue flag, derived on every read
//! - [`aggregate`] - Supplier/client summaries, filtering, search

// =============================================================================
// Module Declarations
// =============================================================================

pub mod age;
pub mod aggregate;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use age::{compute_age, is_overdue, AgedOrder, OVERDUE_THRESHOLD_DAYS};
pub use aggregate::{
    filter_orders, search_orders, summarize_by_client_product, summarize_by_supplier,
    ClientProductSummary, SupplierSummary,
};
pub use error::{CoreError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length accepted for free-text name fields (empresa, producto).
///
/// Keeps pasted garbage out of the listing and chart labels. Anything the
/// dashboard renders as an axis label has to fit on screen anyway.
pub const MAX_TEXT_FIELD_LEN: usize = 200;

//! # pendientes-db: Database Layer for the Order Tracker
//!
//! SQLite storage for the "Sistema de Pendientes" dashboard, on sqlx.
//!
//! ## Data Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Presentation layer                                          │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │                  pendientes-db (THIS CRATE)                  │
//! │                                                              │
//! │   ┌────────────┐   ┌──────────────┐   ┌──────────────┐      │
//! │   │  Database  │   │ OrderService │   │  Migrations  │      │
//! │   │ (pool.rs)  │◄──│ (service.rs) │   │  (embedded)  │      │
//! │   └────────────┘   └──────┬───────┘   └──────────────┘      │
//! │                           │                                  │
//! │                    ┌──────▼──────────┐                       │
//! │                    │ OrderRepository │                       │
//! │                    └─────────────────┘                       │
//! └──────────────────────────────┬───────────────────────────────┘
//!                                │
//! ┌──────────────────────────────▼───────────────────────────────┐
//! │  SQLite: pendientes + entregas_completadas                   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - Order repository (SQL lives here)
//! - [`service`] - Lifecycle service the presentation layer calls
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pendientes_db::{Database, DbConfig, OrderService};
//!
//! let db = Database::new(DbConfig::new("pendientes.db")).await?;
//! let service = OrderService::new(db);
//!
//! let order = service.create(fields).await?;
//! let delivery = service.complete(&order.id, None).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};
pub use repository::order::OrderRepository;
pub use service::{OrderService, ServiceError};

//! # Order Repository
//!
//! Database operations for pending orders and completed deliveries.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  1. INSERT                                                  │
//! │     └── insert() → pendientes row, id + fecha_creacion      │
//! │         assigned here                                       │
//! │                                                             │
//! │  2. EDIT (any number of times)                              │
//! │     └── update() → overwrites business columns;             │
//! │         id and fecha_creacion are never written             │
//! │                                                             │
//! │  3. COMPLETE                                                │
//! │     └── complete() → one transaction:                       │
//! │         SELECT row → INSERT entregas_completadas →          │
//! │         DELETE pendientes → COMMIT                          │
//! │         (error anywhere rolls back both tables)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no standalone delete: the only way a row leaves `pendientes`
//! is the completion transaction.
//!
//! Queries are bound at runtime (`sqlx::query_as` + `.bind`), with plain
//! row structs mapped into domain types afterwards; status and billing
//! text goes through the lenient core parsers so rows written by earlier
//! dashboard revisions ("Pendiente", "parcial") still load.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use pendientes_core::{CompletedDelivery, OrderFields, OrderStatus, PendingOrder};

const PENDING_COLUMNS: &str = "id, empresa, rut_empresa, producto, sku, cantidad, proveedor, \
     tipo_facturacion, orden_compra, fecha_nota_venta, n_nota_venta, fecha_entrega, \
     estado, motivo, vendedor, fecha_creacion";

const COMPLETED_COLUMNS: &str = "id, empresa, rut_empresa, producto, sku, cantidad, proveedor, \
     tipo_facturacion, orden_compra, fecha_nota_venta, n_nota_venta, fecha_entrega, \
     motivo, vendedor, fecha_creacion";

// =============================================================================
// Row Types
// =============================================================================

/// Raw `pendientes` row. Enum columns stay text until [`into_order`]
/// runs them through the core parsers.
///
/// [`into_order`]: PendingOrderRow::into_order
#[derive(Debug, sqlx::FromRow)]
struct PendingOrderRow {
    id: String,
    empresa: String,
    rut_empresa: Option<String>,
    producto: String,
    sku: Option<String>,
    cantidad: i64,
    proveedor: String,
    tipo_facturacion: String,
    orden_compra: Option<String>,
    fecha_nota_venta: NaiveDate,
    n_nota_venta: Option<String>,
    fecha_entrega: Option<NaiveDate>,
    estado: String,
    motivo: Option<String>,
    vendedor: String,
    fecha_creacion: DateTime<Utc>,
}

impl PendingOrderRow {
    fn into_order(self) -> DbResult<PendingOrder> {
        let estado: OrderStatus = self
            .estado
            .parse()
            .map_err(|e| DbError::corrupt_row("pendientes", format!("{e} (id {})", self.id)))?;
        let tipo_facturacion = self
            .tipo_facturacion
            .parse()
            .map_err(|e| DbError::corrupt_row("pendientes", format!("{e} (id {})", self.id)))?;

        Ok(PendingOrder {
            id: self.id,
            empresa: self.empresa,
            rut_empresa: self.rut_empresa,
            producto: self.producto,
            sku: self.sku,
            cantidad: self.cantidad,
            proveedor: self.proveedor,
            tipo_facturacion,
            orden_compra: self.orden_compra,
            fecha_nota_venta: self.fecha_nota_venta,
            n_nota_venta: self.n_nota_venta,
            fecha_entrega: self.fecha_entrega,
            estado,
            motivo: self.motivo,
            vendedor: self.vendedor,
            fecha_creacion: self.fecha_creacion,
        })
    }
}

/// Raw `entregas_completadas` row.
#[derive(Debug, sqlx::FromRow)]
struct CompletedDeliveryRow {
    id: String,
    empresa: String,
    rut_empresa: Option<String>,
    producto: String,
    sku: Option<String>,
    cantidad: i64,
    proveedor: String,
    tipo_facturacion: String,
    orden_compra: Option<String>,
    fecha_nota_venta: NaiveDate,
    n_nota_venta: Option<String>,
    fecha_entrega: NaiveDate,
    motivo: Option<String>,
    vendedor: String,
    fecha_creacion: DateTime<Utc>,
}

impl CompletedDeliveryRow {
    fn into_delivery(self) -> DbResult<CompletedDelivery> {
        let tipo_facturacion = self.tipo_facturacion.parse().map_err(|e| {
            DbError::corrupt_row("entregas_completadas", format!("{e} (id {})", self.id))
        })?;

        Ok(CompletedDelivery {
            id: self.id,
            empresa: self.empresa,
            rut_empresa: self.rut_empresa,
            producto: self.producto,
            sku: self.sku,
            cantidad: self.cantidad,
            proveedor: self.proveedor,
            tipo_facturacion,
            orden_compra: self.orden_compra,
            fecha_nota_venta: self.fecha_nota_venta,
            n_nota_venta: self.n_nota_venta,
            fecha_entrega: self.fecha_entrega,
            motivo: self.motivo,
            vendedor: self.vendedor,
            fecha_creacion: self.fecha_creacion,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for order storage operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Lists all pending orders, newest first.
    pub async fn list_pending(&self) -> DbResult<Vec<PendingOrder>> {
        let rows: Vec<PendingOrderRow> = sqlx::query_as(&format!(
            "SELECT {PENDING_COLUMNS} FROM pendientes ORDER BY fecha_creacion DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed pending orders");
        rows.into_iter().map(PendingOrderRow::into_order).collect()
    }

    /// Lists completed deliveries, most recently delivered first.
    pub async fn list_completed(&self) -> DbResult<Vec<CompletedDelivery>> {
        let rows: Vec<CompletedDeliveryRow> = sqlx::query_as(&format!(
            "SELECT {COMPLETED_COLUMNS} FROM entregas_completadas ORDER BY fecha_entrega DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed completed deliveries");
        rows.into_iter()
            .map(CompletedDeliveryRow::into_delivery)
            .collect()
    }

    /// Gets a pending order by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<PendingOrder>> {
        let row: Option<PendingOrderRow> = sqlx::query_as(&format!(
            "SELECT {PENDING_COLUMNS} FROM pendientes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PendingOrderRow::into_order).transpose()
    }

    /// Inserts a new pending order.
    ///
    /// The two store-assigned fields are minted here: a fresh UUID v4 id
    /// and `fecha_creacion = now`. Everything else is written exactly as
    /// supplied; status forcing is the lifecycle service's job, not the
    /// adapter's.
    pub async fn insert(&self, fields: &OrderFields) -> DbResult<PendingOrder> {
        let id = Uuid::new_v4().to_string();
        let fecha_creacion = Utc::now();

        debug!(id = %id, empresa = %fields.empresa, producto = %fields.producto, "Inserting pending order");

        sqlx::query(
            r#"
            INSERT INTO pendientes (
                id, empresa, rut_empresa, producto, sku, cantidad, proveedor,
                tipo_facturacion, orden_compra, fecha_nota_venta, n_nota_venta,
                fecha_entrega, estado, motivo, vendedor, fecha_creacion
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15, ?16
            )
            "#,
        )
        .bind(&id)
        .bind(&fields.empresa)
        .bind(&fields.rut_empresa)
        .bind(&fields.producto)
        .bind(&fields.sku)
        .bind(fields.cantidad)
        .bind(&fields.proveedor)
        .bind(fields.tipo_facturacion.as_str())
        .bind(&fields.orden_compra)
        .bind(fields.fecha_nota_venta)
        .bind(&fields.n_nota_venta)
        .bind(fields.fecha_entrega)
        .bind(fields.estado.as_str())
        .bind(&fields.motivo)
        .bind(&fields.vendedor)
        .bind(fecha_creacion)
        .execute(&self.pool)
        .await?;

        Ok(PendingOrder {
            id,
            empresa: fields.empresa.clone(),
            rut_empresa: fields.rut_empresa.clone(),
            producto: fields.producto.clone(),
            sku: fields.sku.clone(),
            cantidad: fields.cantidad,
            proveedor: fields.proveedor.clone(),
            tipo_facturacion: fields.tipo_facturacion,
            orden_compra: fields.orden_compra.clone(),
            fecha_nota_venta: fields.fecha_nota_venta,
            n_nota_venta: fields.n_nota_venta.clone(),
            fecha_entrega: fields.fecha_entrega,
            estado: fields.estado,
            motivo: fields.motivo.clone(),
            vendedor: fields.vendedor.clone(),
            fecha_creacion,
        })
    }

    /// Overwrites the business columns of an existing pending order.
    ///
    /// `id` and `fecha_creacion` are not in the column list, so they can
    /// never change here.
    pub async fn update(&self, id: &str, fields: &OrderFields) -> DbResult<()> {
        debug!(id = %id, "Updating pending order");

        let result = sqlx::query(
            r#"
            UPDATE pendientes SET
                empresa = ?2,
                rut_empresa = ?3,
                producto = ?4,
                sku = ?5,
                cantidad = ?6,
                proveedor = ?7,
                tipo_facturacion = ?8,
                orden_compra = ?9,
                fecha_nota_venta = ?10,
                n_nota_venta = ?11,
                fecha_entrega = ?12,
                estado = ?13,
                motivo = ?14,
                vendedor = ?15
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&fields.empresa)
        .bind(&fields.rut_empresa)
        .bind(&fields.producto)
        .bind(&fields.sku)
        .bind(fields.cantidad)
        .bind(&fields.proveedor)
        .bind(fields.tipo_facturacion.as_str())
        .bind(&fields.orden_compra)
        .bind(fields.fecha_nota_venta)
        .bind(&fields.n_nota_venta)
        .bind(fields.fecha_entrega)
        .bind(fields.estado.as_str())
        .bind(&fields.motivo)
        .bind(&fields.vendedor)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("PendingOrder", id));
        }

        Ok(())
    }

    /// Completes a pending order: copies it into `entregas_completadas`
    /// and removes it from `pendientes`, atomically.
    ///
    /// `fecha_entrega` defaults to today when the caller supplies none.
    /// The read, the insert and the delete run inside one transaction;
    /// an error at any point rolls the whole transition back, so the
    /// order is never duplicated in both tables or lost from both.
    pub async fn complete(
        &self,
        id: &str,
        fecha_entrega: Option<NaiveDate>,
    ) -> DbResult<CompletedDelivery> {
        debug!(id = %id, "Completing pending order");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let row: Option<PendingOrderRow> = sqlx::query_as(&format!(
            "SELECT {PENDING_COLUMNS} FROM pendientes WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let order = match row {
            Some(row) => row.into_order()?,
            None => return Err(DbError::not_found("PendingOrder", id)),
        };

        let delivered = fecha_entrega.unwrap_or_else(|| Utc::now().date_naive());
        let completed = order.into_completed(delivered);

        sqlx::query(
            r#"
            INSERT INTO entregas_completadas (
                id, empresa, rut_empresa, producto, sku, cantidad, proveedor,
                tipo_facturacion, orden_compra, fecha_nota_venta, n_nota_venta,
                fecha_entrega, motivo, vendedor, fecha_creacion
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                ?8, ?9, ?10, ?11,
                ?12, ?13, ?14, ?15
            )
            "#,
        )
        .bind(&completed.id)
        .bind(&completed.empresa)
        .bind(&completed.rut_empresa)
        .bind(&completed.producto)
        .bind(&completed.sku)
        .bind(completed.cantidad)
        .bind(&completed.proveedor)
        .bind(completed.tipo_facturacion.as_str())
        .bind(&completed.orden_compra)
        .bind(completed.fecha_nota_venta)
        .bind(&completed.n_nota_venta)
        .bind(completed.fecha_entrega)
        .bind(&completed.motivo)
        .bind(&completed.vendedor)
        .bind(completed.fecha_creacion)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM pendientes WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(id = %id, fecha_entrega = %delivered, "Order completed");
        Ok(completed)
    }

    /// Counts pending orders (for diagnostics and seeding).
    pub async fn count_pending(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pendientes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use pendientes_core::{BillingType, OrderStatus};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn fields(empresa: &str, producto: &str, proveedor: &str, cantidad: i64) -> OrderFields {
        OrderFields {
            empresa: empresa.to_string(),
            rut_empresa: Some("76.111.222-3".to_string()),
            producto: producto.to_string(),
            sku: Some("SKU-1".to_string()),
            cantidad,
            proveedor: proveedor.to_string(),
            tipo_facturacion: BillingType::PartialWithReceipt,
            orden_compra: Some("OC-77".to_string()),
            fecha_nota_venta: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            n_nota_venta: Some("NV-301".to_string()),
            fecha_entrega: None,
            estado: OrderStatus::Pending,
            motivo: Some("Sin stock del proveedor".to_string()),
            vendedor: "C. Muñoz".to_string(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_creation_timestamp() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 3))
            .await
            .unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(created.cantidad, 3);
    }

    #[tokio::test]
    async fn insert_round_trips_every_field() {
        let db = test_db().await;
        let input = fields("ACME Corp", "Bomba centrífuga", "Hidrotek", 3);
        let created = db.orders().insert(&input).await.unwrap();

        let listed = db.orders().list_pending().await.unwrap();
        assert_eq!(listed.len(), 1);

        let stored = &listed[0];
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.fecha_creacion, created.fecha_creacion);
        // Everything the caller supplied comes back untouched.
        assert_eq!(stored.fields(), input);
    }

    #[tokio::test]
    async fn list_pending_orders_newest_first() {
        let db = test_db().await;
        let first = db
            .orders()
            .insert(&fields("A", "Producto 1", "P", 1))
            .await
            .unwrap();
        let second = db
            .orders()
            .insert(&fields("B", "Producto 2", "P", 1))
            .await
            .unwrap();

        let listed = db.orders().list_pending().await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|o| o.id.as_str()).collect();
        // Both inserts may share a timestamp; newest-first just means the
        // first insert never precedes the second.
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
        if listed[0].fecha_creacion != listed[1].fecha_creacion {
            assert!(listed[0].fecha_creacion > listed[1].fecha_creacion);
        }
    }

    #[tokio::test]
    async fn update_overwrites_fields_but_not_identity() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 3))
            .await
            .unwrap();

        let mut edited = fields("ACME Corp", "Bomba 5HP", "Zeta", 10);
        edited.estado = OrderStatus::InProcess;
        db.orders().update(&created.id, &edited).await.unwrap();

        let stored = db.orders().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.producto, "Bomba 5HP");
        assert_eq!(stored.proveedor, "Zeta");
        assert_eq!(stored.cantidad, 10);
        assert_eq!(stored.estado, OrderStatus::InProcess);
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.fecha_creacion, created.fecha_creacion);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let db = test_db().await;
        let err = db
            .orders()
            .update("no-such-id", &fields("A", "B", "C", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn complete_moves_the_record_across_tables() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 3))
            .await
            .unwrap();
        let delivered_on = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();

        let completed = db
            .orders()
            .complete(&created.id, Some(delivered_on))
            .await
            .unwrap();

        assert_eq!(completed.id, created.id);
        assert_eq!(completed.fecha_entrega, delivered_on);
        assert_eq!(completed.fecha_creacion, created.fecha_creacion);

        let pending = db.orders().list_pending().await.unwrap();
        assert!(pending.is_empty());

        let deliveries = db.orders().list_completed().await.unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0], completed);
        assert_eq!(deliveries[0].empresa, "ACME Corp");
        assert_eq!(deliveries[0].cantidad, 3);
    }

    #[tokio::test]
    async fn complete_defaults_delivery_date_to_today() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 1))
            .await
            .unwrap();

        let completed = db.orders().complete(&created.id, None).await.unwrap();
        assert_eq!(completed.fecha_entrega, Utc::now().date_naive());
    }

    #[tokio::test]
    async fn complete_unknown_id_is_not_found() {
        let db = test_db().await;
        let err = db.orders().complete("no-such-id", None).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn complete_rolls_back_when_the_copy_fails() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 3))
            .await
            .unwrap();

        // Force the INSERT half of the transition to fail mid-transaction.
        sqlx::query("DROP TABLE entregas_completadas")
            .execute(db.pool())
            .await
            .unwrap();

        db.orders()
            .complete(&created.id, None)
            .await
            .expect_err("completion should fail without the destination table");

        // The pending row must have survived the rollback.
        let pending = db.orders().list_pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, created.id);
    }

    #[tokio::test]
    async fn legacy_spanish_status_text_still_loads() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 2))
            .await
            .unwrap();

        // A row as an earlier dashboard revision would have written it.
        sqlx::query("UPDATE pendientes SET estado = 'Pendiente' WHERE id = ?1")
            .bind(&created.id)
            .execute(db.pool())
            .await
            .unwrap();

        let stored = db.orders().get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(stored.estado, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn unknown_status_text_is_a_corrupt_row() {
        let db = test_db().await;
        let created = db
            .orders()
            .insert(&fields("ACME Corp", "Bomba", "Hidrotek", 2))
            .await
            .unwrap();

        sqlx::query("UPDATE pendientes SET estado = 'archivado' WHERE id = ?1")
            .bind(&created.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.orders().get_by_id(&created.id).await.unwrap_err();
        assert!(matches!(err, DbError::CorruptRow { .. }));
    }

    #[tokio::test]
    async fn count_pending_tracks_inserts() {
        let db = test_db().await;
        assert_eq!(db.orders().count_pending().await.unwrap(), 0);

        db.orders()
            .insert(&fields("A", "B", "C", 1))
            .await
            .unwrap();
        assert_eq!(db.orders().count_pending().await.unwrap(), 1);
    }
}

//! # Aggregation
//!
//! Grouping, filtering and search over pending orders, feeding the
//! dashboard's charts and tables. All functions are pure over a slice of
//! records; the storage layer is queried once and the result sliced here.
//!
//! Group output is sorted by group key (BTreeMap iteration), so the same
//! input always produces the same sequence and chart bars do not jump
//! around between renders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::PendingOrder;

// =============================================================================
// Summary Rows
// =============================================================================

/// Total outstanding quantity per supplier. One bar in the supplier chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierSummary {
    /// Supplier name. Empty when orders have no supplier assigned yet;
    /// those rows form their own group rather than disappearing.
    pub proveedor: String,
    pub total_cantidad: i64,
}

/// Outstanding quantity per (product, sku, supplier) for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProductSummary {
    pub producto: String,
    pub sku: Option<String>,
    pub proveedor: String,
    pub total_cantidad: i64,
}

// =============================================================================
// Grouping
// =============================================================================

/// Sums outstanding quantities per supplier, sorted by supplier name.
pub fn summarize_by_supplier(orders: &[PendingOrder]) -> Vec<SupplierSummary> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for order in orders {
        *totals.entry(order.proveedor.as_str()).or_insert(0) += order.cantidad;
    }

    totals
        .into_iter()
        .map(|(proveedor, total_cantidad)| SupplierSummary {
            proveedor: proveedor.to_string(),
            total_cantidad,
        })
        .collect()
}

/// Per-product breakdown for a single client.
///
/// Filters to `empresa` (exact match) first, then groups by
/// (producto, sku, proveedor) and sums quantities. Ordering follows the
/// group key.
pub fn summarize_by_client_product(
    orders: &[PendingOrder],
    empresa: &str,
) -> Vec<ClientProductSummary> {
    let mut totals: BTreeMap<(&str, Option<&str>, &str), i64> = BTreeMap::new();
    for order in orders.iter().filter(|o| o.empresa == empresa) {
        let key = (
            order.producto.as_str(),
            order.sku.as_deref(),
            order.proveedor.as_str(),
        );
        *totals.entry(key).or_insert(0) += order.cantidad;
    }

    totals
        .into_iter()
        .map(|((producto, sku, proveedor), total_cantidad)| ClientProductSummary {
            producto: producto.to_string(),
            sku: sku.map(str::to_string),
            proveedor: proveedor.to_string(),
            total_cantidad,
        })
        .collect()
}

// =============================================================================
// Filtering & Search
// =============================================================================

/// Exact-match filter on client and/or supplier.
///
/// `None` means "no filter" for that field; both filters combine with AND.
pub fn filter_orders(
    orders: &[PendingOrder],
    empresa: Option<&str>,
    proveedor: Option<&str>,
) -> Vec<PendingOrder> {
    orders
        .iter()
        .filter(|o| empresa.is_none_or(|e| o.empresa == e))
        .filter(|o| proveedor.is_none_or(|p| o.proveedor == p))
        .cloned()
        .collect()
}

/// Case-insensitive substring search on client and/or product name.
///
/// An absent needle leaves that field unfiltered; an empty needle matches
/// every record. An empty field value never matches a non-empty needle.
pub fn search_orders(
    orders: &[PendingOrder],
    empresa_contains: Option<&str>,
    producto_contains: Option<&str>,
) -> Vec<PendingOrder> {
    let empresa_needle = empresa_contains.map(str::to_lowercase);
    let producto_needle = producto_contains.map(str::to_lowercase);

    orders
        .iter()
        .filter(|o| matches_needle(&o.empresa, empresa_needle.as_deref()))
        .filter(|o| matches_needle(&o.producto, producto_needle.as_deref()))
        .cloned()
        .collect()
}

fn matches_needle(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => haystack.to_lowercase().contains(needle),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

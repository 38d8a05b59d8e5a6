//! # Seed Data Generator
//!
//! Populates the database with sample pending orders for development.
//!
//! ## Usage
//! ```bash
//! # Default: 40 orders into ./pendientes_dev.db
//! cargo run -p pendientes-db --bin seed
//!
//! # Custom amount and path
//! cargo run -p pendientes-db --bin seed -- --count 100 --db ./data/pendientes.db
//! ```
//!
//! A slice of the generated orders is completed immediately so both the
//! pending listing and the delivered history have data to show.

use std::env;

use chrono::{Days, Utc};
use tracing_subscriber::EnvFilter;

use pendientes_core::{summarize_by_supplier, BillingType, OrderFields, OrderStatus};
use pendientes_db::{Database, DbConfig, OrderService};

/// (empresa, rut_empresa) pairs for sample clients.
const CLIENTES: &[(&str, &str)] = &[
    ("Aguas del Valle", "76.123.456-0"),
    ("Constructora Andes", "77.234.567-1"),
    ("Piscinas del Sur", "76.345.678-2"),
    ("Hotel Costanera", "78.456.789-3"),
    ("Agrícola San Pedro", "76.567.890-4"),
    ("Minera Atacama Norte", "79.678.901-5"),
];

/// (producto, sku, proveedor) triples for sample order lines.
const PRODUCTOS: &[(&str, &str, &str)] = &[
    ("Bomba centrífuga 3HP", "BC-300", "Hidrotek"),
    ("Filtro de arena 600mm", "FA-600", "Hidrotek"),
    ("Clorador salino", "CS-25", "AquaChile"),
    ("Motor monofásico 2HP", "MM-200", "ElectroAndes"),
    ("Kit de mantención", "KM-01", "AquaChile"),
    ("Válvula selectora 6 vías", "VS-6", "Hidrotek"),
    ("Panel de control", "PC-110", "ElectroAndes"),
    ("Manguera reforzada 50m", "MR-50", ""),
];

const VENDEDORES: &[&str] = &["P. Rojas", "C. Muñoz", "F. Herrera"];

const MOTIVOS: &[&str] = &[
    "Sin stock del proveedor",
    "Esperando confirmación del cliente",
    "Pago pendiente",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./pendientes_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(40);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Pendientes Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of orders to generate (default: 40)");
                println!("  -d, --db <PATH>    Database file path (default: ./pendientes_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Pendientes Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!("Orders:   {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, migrations applied");

    let existing = db.orders().count_pending().await?;
    if existing > 0 {
        println!("⚠ Database already has {} pending orders", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let service = OrderService::new(db);

    println!();
    println!("Generating orders...");

    let mut created_ids = Vec::new();
    for seed in 0..count {
        let fields = generate_order(seed);
        let order = service.create(fields).await?;
        created_ids.push(order.id);
    }
    println!("✓ Created {} pending orders", created_ids.len());

    // Complete roughly a quarter of them so the delivered history is not
    // empty.
    let mut completed = 0;
    for id in created_ids.iter().step_by(4) {
        service.complete(id, None).await?;
        completed += 1;
    }
    println!("✓ Completed {} of them", completed);

    let pending = service.list_pending().await?;
    let today = Utc::now().date_naive();
    let overdue = service
        .list_pending_aged(today + Days::new(10))
        .await?
        .iter()
        .filter(|a| a.overdue)
        .count();

    println!();
    println!("Summary by supplier:");
    for row in summarize_by_supplier(&pending) {
        let name = if row.proveedor.is_empty() {
            "(sin proveedor)"
        } else {
            row.proveedor.as_str()
        };
        println!("  {:<14} {:>5}", name, row.total_cantidad);
    }
    println!();
    println!(
        "  {} pending / {} would be overdue ten days from now",
        pending.len(),
        overdue
    );
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one order's fields from a deterministic seed index.
fn generate_order(seed: usize) -> OrderFields {
    let (empresa, rut) = CLIENTES[seed % CLIENTES.len()];
    let (producto, sku, proveedor) = PRODUCTOS[seed % PRODUCTOS.len()];
    let vendedor = VENDEDORES[seed % VENDEDORES.len()];

    let cantidad = 1 + (seed * 7 % 20) as i64;
    let nota_venta = Utc::now().date_naive() - Days::new((seed % 30) as u64);

    OrderFields {
        empresa: empresa.to_string(),
        rut_empresa: Some(rut.to_string()),
        producto: producto.to_string(),
        sku: (!sku.is_empty()).then(|| sku.to_string()),
        cantidad,
        proveedor: proveedor.to_string(),
        tipo_facturacion: if seed % 3 == 0 {
            BillingType::PartialWithReceipt
        } else {
            BillingType::Complete
        },
        orden_compra: (seed % 2 == 0).then(|| format!("OC-{:04}", 1000 + seed)),
        fecha_nota_venta: nota_venta,
        n_nota_venta: Some(format!("NV-{:04}", 500 + seed)),
        fecha_entrega: None,
        estado: OrderStatus::Pending,
        motivo: (seed % 4 == 0).then(|| MOTIVOS[seed % MOTIVOS.len()].to_string()),
        vendedor: vendedor.to_string(),
    }
}

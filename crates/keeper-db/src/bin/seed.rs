//! # Seed Data Generator
//!
//! Populates the ledger with sample products, clients, and transactions for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed ./keeper_dev.db (default)
//! cargo run -p keeper-db --bin seed
//!
//! # Specify database path
//! cargo run -p keeper-db --bin seed -- --db ./data/keeper.db
//! ```

use std::env;

use keeper_core::{ClientDraft, PaymentStatus, ProductDraft, TransactionDraft, TransactionKind};
use keeper_db::{DbConfig, Ledger};

/// Sample products: (name, category, cost_cents, sale_price_cents, quantity, supplier, min_stock)
const PRODUCTS: &[(&str, &str, i64, i64, i64, &str, i64)] = &[
    ("Arabica Coffee 1kg", "Beverages", 1200, 2499, 40, "Highland Roasters", 10),
    ("Green Tea Box", "Beverages", 350, 899, 60, "Leaf & Co", 15),
    ("Sparkling Water 6-Pack", "Beverages", 280, 599, 120, "Aqua Distribution", 24),
    ("Sourdough Loaf", "Bakery", 150, 450, 25, "Corner Bakery", 8),
    ("Croissant", "Bakery", 60, 220, 50, "Corner Bakery", 12),
    ("Olive Oil 500ml", "Pantry", 480, 1099, 30, "Mediterra Imports", 6),
    ("Sea Salt 250g", "Pantry", 90, 299, 80, "Mediterra Imports", 20),
    ("Notebook A5", "Stationery", 110, 399, 200, "Paperworks", 30),
    ("Gel Pen Black", "Stationery", 35, 149, 300, "Paperworks", 50),
    ("Canvas Tote Bag", "Merch", 250, 899, 45, "Printhouse", 10),
];

/// Sample clients: (name, email, phone)
const CLIENTS: &[(&str, &str, &str)] = &[
    ("Marta Silva", "marta@example.com", "+351 910 000 001"),
    ("Joao Pereira", "joao@example.com", "+351 910 000 002"),
    ("Cafe Central", "orders@cafecentral.example", "+351 210 000 003"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./keeper_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Keeper Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./keeper_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Keeper Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let ledger = Ledger::open(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = ledger.database().products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding products...");

    let mut product_ids = Vec::new();
    for (name, category, cost, price, qty, supplier, min_stock) in PRODUCTS {
        let product = ledger
            .add_product(ProductDraft {
                name: name.to_string(),
                category: category.to_string(),
                cost_cents: *cost,
                sale_price_cents: *price,
                quantity: *qty,
                supplier: supplier.to_string(),
                min_stock: *min_stock,
                image: None,
            })
            .await?;
        product_ids.push(product.id);
    }
    println!("  {} products", product_ids.len());

    println!("Seeding clients...");
    let mut client_ids = Vec::new();
    for (name, email, phone) in CLIENTS {
        let client = ledger
            .add_client(ClientDraft {
                name: name.to_string(),
                email: Some(email.to_string()),
                phone: Some(phone.to_string()),
                address: None,
            })
            .await?;
        client_ids.push(client.id);
    }
    println!("  {} clients", client_ids.len());

    println!("Seeding transactions...");
    let mut transaction_count = 0;
    for (i, product_id) in product_ids.iter().enumerate() {
        let sale_qty = (i as i64 % 3) + 1;
        let unit_price = PRODUCTS[i].3;

        // A paid sale per product
        ledger
            .add_transaction(TransactionDraft {
                kind: TransactionKind::Sale,
                product_id: product_id.clone(),
                client_id: client_ids.get(i % client_ids.len()).cloned(),
                quantity: sale_qty,
                unit_price_cents: unit_price,
                total_cents: unit_price * sale_qty,
                payment_status: PaymentStatus::Paid,
                description: None,
            })
            .await?;
        transaction_count += 1;

        // Restock every third product
        if i % 3 == 0 {
            let cost = PRODUCTS[i].2;
            ledger
                .add_transaction(TransactionDraft {
                    kind: TransactionKind::Purchase,
                    product_id: product_id.clone(),
                    client_id: None,
                    quantity: 20,
                    unit_price_cents: cost,
                    total_cents: cost * 20,
                    payment_status: PaymentStatus::Paid,
                    description: Some("Restock order".to_string()),
                })
                .await?;
            transaction_count += 1;
        }
    }

    // One pending sale so receivables show up in the summary
    if let (Some(product_id), Some(client_id)) = (product_ids.first(), client_ids.first()) {
        let unit_price = PRODUCTS[0].3;
        ledger
            .add_transaction(TransactionDraft {
                kind: TransactionKind::Sale,
                product_id: product_id.clone(),
                client_id: Some(client_id.clone()),
                quantity: 2,
                unit_price_cents: unit_price,
                total_cents: unit_price * 2,
                payment_status: PaymentStatus::Pending,
                description: Some("Invoice due end of month".to_string()),
            })
            .await?;
        transaction_count += 1;
    }
    println!("  {} transactions", transaction_count);

    let summary = ledger.financial_summary(None, None).await?;

    println!();
    println!("✓ Seed complete!");
    println!(
        "  Revenue: {:.2}  Costs: {:.2}  Profit: {:.2}  Margin: {:.1}%  Receivables: {:.2}",
        summary.total_revenue_cents as f64 / 100.0,
        summary.total_costs_cents as f64 / 100.0,
        summary.profit_cents as f64 / 100.0,
        summary.profit_margin,
        summary.pending_receivables_cents as f64 / 100.0,
    );

    Ok(())
}

//! # Seed Data Generator
//!
//! Populates the database with sample categories and products for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./kasir.db
//! cargo run -p kasir-db --bin seed
//!
//! # Specify database path
//! cargo run -p kasir-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! Seeding is skipped when the database already has products.

use kasir_core::{CategoryInput, Money, ProductInput};
use kasir_db::{Database, DbConfig};
use std::env;

/// (category, description, [(product, price, stock)])
const CATALOGUE: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Makanan",
        "Mie instan, roti dan makanan ringan",
        &[
            ("Indomie Goreng", 3500, 100),
            ("Indomie Soto", 3300, 80),
            ("Mie Sedaap Goreng", 3200, 80),
            ("Roti Tawar Sari Roti", 16000, 20),
            ("Chitato Sapi Panggang 68g", 11500, 30),
            ("Beng-Beng", 2500, 60),
        ],
    ),
    (
        "Minuman",
        "Minuman botol, kopi dan teh",
        &[
            ("Aqua 600ml", 3500, 120),
            ("Teh Botol Sosro 450ml", 5000, 50),
            ("Kopi Kapal Api Special Mix", 1500, 200),
            ("Good Day Cappuccino", 2000, 150),
            ("Pocari Sweat 500ml", 8000, 40),
        ],
    ),
    (
        "Kebutuhan Rumah",
        "Sabun, deterjen dan perlengkapan dapur",
        &[
            ("Rinso Anti Noda 770g", 24000, 15),
            ("Sunlight Jeruk Nipis 755ml", 17500, 20),
            ("Lifebuoy Sabun Batang", 4500, 45),
            ("Pepsodent 190g", 13000, 25),
        ],
    ),
    (
        "Sembako",
        "Beras, minyak, gula dan telur",
        &[
            ("Beras Pandan Wangi 5kg", 78000, 10),
            ("Minyak Goreng Bimoli 2L", 38000, 12),
            ("Gula Pasir Gulaku 1kg", 17500, 25),
            ("Telur Ayam 1kg", 29000, 8),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./kasir.db");

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
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kasir Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut categories = 0;
    let mut products = 0;

    for (category_name, description, items) in CATALOGUE {
        let category = db
            .categories()
            .create(&CategoryInput {
                name: category_name.to_string(),
                description: description.to_string(),
            })
            .await?;
        categories += 1;

        for (name, price, stock) in items.iter() {
            let input = ProductInput {
                name: name.to_string(),
                price: Money::new(*price),
                stock: *stock,
                category_id: category.id,
            };
            if let Err(e) = db.products().create(&input).await {
                eprintln!("Failed to insert {}: {}", name, e);
                continue;
            }
            products += 1;
        }

        println!("  {} ({} products)", category.name, items.len());
    }

    println!();
    println!("✓ Created {} categories and {} products", categories, products);

    db.close().await;
    Ok(())
}

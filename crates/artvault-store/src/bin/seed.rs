//! # Sample Catalog Seeder
//!
//! Writes the built-in sample artworks into a storage database.
//!
//! ## Usage
//! ```bash
//! # Seed ./artvault_dev.db
//! cargo run -p artvault-store --bin seed
//!
//! # Specify database path
//! cargo run -p artvault-store --bin seed -- --db ./data/artvault.db
//!
//! # Wipe every key first
//! cargo run -p artvault-store --bin seed -- --reset
//! ```
//!
//! Listings already saved are kept; only samples that are missing get added.

use std::env;

use artvault_core::catalog::{merge_with_samples, sample_listings};
use artvault_store::{Storage, StorageConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./artvault_dev.db");
    let mut reset = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--reset" | "-r" => reset = true,
            "--help" | "-h" => {
                println!("ArtVault Sample Catalog Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./artvault_dev.db)");
                println!("  -r, --reset        Remove every stored key before seeding");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => eprintln!("Ignoring unknown argument: {other}"),
        }
        i += 1;
    }

    println!("🌱 ArtVault Sample Catalog Seeder");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let storage = Storage::new(StorageConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if reset {
        storage.local_storage().clear().await?;
        println!("✓ Cleared existing keys");
    }

    let store = storage.marketplace();
    let saved = store.load_listings().await?;
    let before = saved.len();

    let merged = merge_with_samples(saved, sample_listings());
    store.save_listings(&merged).await?;

    println!();
    println!(
        "✓ {} listings stored ({} added)",
        merged.len(),
        merged.len() - before
    );

    storage.close().await;
    println!("✓ Seed complete!");

    Ok(())
}

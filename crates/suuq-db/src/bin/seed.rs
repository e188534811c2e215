//! # Seed Data Generator
//!
//! Populates a development database with sample listings in every
//! moderation status, plus one administrator.
//!
//! ## Usage
//! ```bash
//! # 40 products (default) into ./suuq_dev.db
//! cargo run -p suuq-db --bin seed
//!
//! # Custom amount and path, and make user `admin-1` an administrator
//! cargo run -p suuq-db --bin seed -- --count 200 --db ./data/suuq.db --admin admin-1
//! ```
//!
//! ## Generated Products
//! - Names cycle through each category's sample list
//! - Status cycles pending → approved → rejected
//! - Prices between $1.00 and $500.00
//! - `created_at` spread over the last days so "newest" sorting is visible

use chrono::{Duration, Utc};
use std::env;
use suuq_core::{Category, NewProduct, ProductStatus, SellerInfo};
use suuq_db::{Database, DbConfig};

/// Sample names per category.
const SAMPLES: &[(Category, &[&str])] = &[
    (
        Category::Elektaroonig,
        &["Samsung A14", "iPhone 11", "HP Laptop", "Solar Panel 100W", "Power Bank"],
    ),
    (
        Category::Dharka,
        &["Macawis", "Dirac", "Garbasaar", "Men's Shirt", "Sneakers"],
    ),
    (
        Category::Guriga,
        &["Sofa Set", "Carpet", "Kitchen Pots", "Bed Frame", "Curtains"],
    ),
    (
        Category::Cunto,
        &["Basmati Rice 25kg", "Sugar 50kg", "Camel Milk", "Dates 5kg", "Sesame Oil"],
    ),
    (
        Category::Buugaag,
        &["Quran", "English Grammar", "Somali Dictionary", "Math Grade 8", "Novel"],
    ),
    (
        Category::Ciyaaraha,
        &["Football", "Bicycle", "Jersey", "Dumbbells", "Tennis Racket"],
    ),
    (
        Category::Gaadiid,
        &["Toyota Vitz", "Bajaj", "Motorbike", "Car Tyres", "Toyota Noah"],
    ),
    (
        Category::Kale,
        &["Perfume", "Watch", "Incense Burner", "Umbrella", "Backpack"],
    ),
];

const LOCATIONS: &[&str] = &["Hodan", "Waberi", "Hargeisa", "Bosaso", "Kismayo"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 40;
    let mut db_path = String::from("./suuq_dev.db");
    let mut admin: Option<String> = None;

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
            "--admin" | "-a" => {
                if i + 1 < args.len() {
                    admin = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Suuq Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>     Number of products to generate (default: 40)");
                println!("  -d, --db <PATH>     Database file path (default: ./suuq_dev.db)");
                println!("  -a, --admin <UID>   Grant moderation rights to a user id");
                println!("  -h, --help          Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Suuq Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Products: {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if let Some(uid) = &admin {
        db.admins().set_role(uid, true).await?;
        println!("✓ {} is an administrator", uid);
    }

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut by_status = [0usize; 3];

    for seed in 0..count {
        let (category, names) = SAMPLES[seed % SAMPLES.len()];
        let name = names[(seed / SAMPLES.len()) % names.len()];
        let status = ProductStatus::ALL[seed % ProductStatus::ALL.len()];

        let product = db.products().insert(generate_product(category, name, seed)).await?;

        if status != ProductStatus::Pending {
            db.products()
                .update_status(&product.id, status, Utc::now())
                .await?;
        }

        by_status[seed % ProductStatus::ALL.len()] += 1;
    }

    let elapsed = start.elapsed();
    println!();
    println!("✓ Generated {} products in {:?}", count, elapsed);
    for (status, n) in ProductStatus::ALL.iter().zip(by_status) {
        println!("  {:<9} {}", status.as_str(), n);
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates one submission with plausible data.
fn generate_product(category: Category, name: &str, seed: usize) -> NewProduct {
    let user = seed % 7;
    let price_cents = 100 + ((seed * 7919) % 49_900) as i64;

    NewProduct {
        name: name.to_string(),
        description: format!("{} ({}), seller ref #{}", name, category.english_name(), seed),
        category,
        price_cents,
        image_urls: (0..=(seed % 3))
            .map(|n| format!("https://i.ibb.co/seed/{}-{}.jpg", seed, n))
            .collect(),
        seller_info: SellerInfo {
            name: format!("Seller {}", user),
            email: format!("seller{}@example.com", user),
            phone: format!("+25261{:07}", 1_000_000 + seed),
            location: LOCATIONS[seed % LOCATIONS.len()].to_string(),
        },
        user_id: format!("seed-user-{}", user),
        user_email: Some(format!("seller{}@example.com", user)),
        created_at: Utc::now() - Duration::hours(seed as i64),
    }
}

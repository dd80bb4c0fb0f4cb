//! # Seed Data Generator
//!
//! Populates the database with a demo warung catalog for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p warung-db --bin seed
//! cargo run -p warung-db --bin seed -- --db ./data/warung.db
//! ```
//!
//! Creates a handful of categories with typical menu items each, priced
//! in whole rupiah. Already-seeded databases are detected and skipped.

use std::env;

use tracing::info;
use warung_core::{Money, NewMenu};
use warung_db::{Database, DbConfig};

/// Demo catalog: (category, [(menu item, price in rupiah)]).
const CATALOG: &[(&str, &[(&str, i64)])] = &[
    (
        "Makanan",
        &[
            ("Nasi Goreng", 18_000),
            ("Mie Goreng", 16_000),
            ("Ayam Bakar", 22_000),
            ("Ayam Goreng", 20_000),
            ("Soto Ayam", 15_000),
            ("Gado-Gado", 14_000),
            ("Nasi Uduk", 12_000),
        ],
    ),
    (
        "Minuman",
        &[
            ("Es Teh Manis", 5_000),
            ("Es Jeruk", 7_000),
            ("Kopi Hitam", 6_000),
            ("Teh Hangat", 4_000),
            ("Air Mineral", 3_000),
        ],
    ),
    (
        "Camilan",
        &[
            ("Tempe Goreng", 2_000),
            ("Tahu Isi", 3_000),
            ("Pisang Goreng", 3_500),
            ("Kerupuk", 2_000),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let db_path = parse_db_arg().unwrap_or_else(|| "warung.db".to_string());
    info!(path = %db_path, "Seeding demo catalog");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    if !db.menus().list().await?.is_empty() {
        info!("Database already has menu items, nothing to do");
        return Ok(());
    }

    let mut created = 0usize;
    for (category_name, items) in CATALOG {
        let category = db.categories().create(category_name).await?;
        for (name, price) in *items {
            db.menus()
                .create(&NewMenu {
                    name: (*name).to_string(),
                    description: String::new(),
                    price: Money::from_rupiah(*price),
                    category_id: Some(category.id),
                    image_url: String::new(),
                    is_available: true,
                })
                .await?;
            created += 1;
        }
    }

    info!(categories = CATALOG.len(), menus = created, "Seed complete");
    Ok(())
}

/// Parses `--db <path>` from the command line.
fn parse_db_arg() -> Option<String> {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--db" {
            return args.next();
        }
    }
    None
}

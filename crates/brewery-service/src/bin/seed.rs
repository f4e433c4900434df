//! # Seed Data Loader
//!
//! Loads a starter beer catalog for development.
//!
//! ## Usage
//! ```bash
//! # Use BREWERY_DATABASE_PATH (default ./brewery.db)
//! cargo run -p brewery-service --bin seed
//!
//! # Specify database path
//! cargo run -p brewery-service --bin seed -- --db ./data/brewery.db
//! ```
//!
//! The catalog is only loaded into an empty database. Every record goes
//! through `BeerService::create`, so the seed data obeys the same validation
//! as API traffic.

use std::env;

use brewery_core::{BeerDto, FilterCriteria};
use brewery_db::{BeerStore, Database};
use brewery_service::{telemetry, BeerService, ServiceConfig};
use tracing::info;

/// (name, style, upc, price, quantity on hand)
const CATALOG: &[(&str, &str, &str, &str, i64)] = &[
    ("Mango Bobs", "ALE", "0631234200036", "12.95", 120),
    ("Galaxy Cat", "PALE_ALE", "9122089364369", "11.95", 48),
    ("No Hammers On The Bar", "WHEAT", "0083783375213", "13.50", 36),
    ("Blessed", "STOUT", "4666337557578", "14.25", 24),
    ("Adjunct Trail", "STOUT", "8380495518610", "10.95", 60),
    ("Very GGGreenn", "IPA", "5677465691934", "12.50", 72),
    ("Double Barrel Hunahpu's", "STOUT", "5463533082885", "19.95", 12),
    ("Very Hazy", "IPA", "5339741428398", "12.95", 84),
    ("SR-71", "STOUT", "1726923962766", "11.50", 30),
    ("Pliny the Younger", "IPA", "8484957731774", "18.75", 6),
    ("Blessed Wheat", "WHEAT", "6266328524787", "9.95", 90),
    ("Cactus Wheat", "WHEAT", "7490217802727", "10.25", 54),
    ("Sunny Porch", "WHEAT", "8579613295827", "9.50", 66),
    ("Pinball Porter", "PORTER", "2318301340601", "12.95", 42),
    ("Grand Gose", "GOSE", "9401790633828", "11.25", 18),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    let mut config = ServiceConfig::from_env()?;

    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Brewery Catalog Seed Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $BREWERY_DATABASE_PATH or ./brewery.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🍺 Brewery Catalog Seed Loader");
    println!("==============================");
    println!("Database: {}", config.database_path.display());
    println!("Beers:    {}", CATALOG.len());
    println!();

    let db = Database::new(config.db_config()).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.beers().count(&FilterCriteria::All).await?;
    if existing > 0 {
        println!("⚠ Database already has {} beers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to reload.");
        return Ok(());
    }

    let service = BeerService::new(db.beers()).with_config(&config)?;

    let mut loaded = 0;
    for (name, style, upc, price, quantity) in CATALOG {
        let dto = BeerDto {
            beer_name: Some(name.to_string()),
            beer_style: Some(style.to_string()),
            upc: Some(upc.to_string()),
            price: Some(price.to_string()),
            quantity_on_hand: Some(*quantity),
            ..BeerDto::default()
        };

        match service.create(dto).await {
            Ok(_) => loaded += 1,
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    info!(loaded, "Seed complete");
    println!();
    println!("✓ Loaded {} beers", loaded);

    db.close().await;
    Ok(())
}

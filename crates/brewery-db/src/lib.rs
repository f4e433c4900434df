//! # brewery-db: Record Store for the Brewery Catalog
//!
//! SQLite persistence behind the [`BeerStore`] port.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brewery Data Flow                                │
//! │                                                                         │
//! │  BeerService (brewery-service)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   brewery-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  BeerStore    │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store.rs)   │    │  (embedded)  │  │   │
//! │  │   │               │    │       ▲       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ BeerRepository│    │ 001_beer_    │  │   │
//! │  │   │               │    │ (repository/) │    │   schema.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (BREWERY_DATABASE_PATH)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - The `BeerStore` port
//! - [`repository`] - SQLite implementation of the port
//!
//! ## Usage
//!
//! ```rust,ignore
//! use brewery_db::{BeerStore, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("brewery.db")).await?;
//! let beer = db.beers().find_by_upc("0631234200036").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::beer::BeerRepository;
pub use store::BeerStore;

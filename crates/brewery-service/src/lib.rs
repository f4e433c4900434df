//! # brewery-service: Listing & Mutation Engine
//!
//! The non-blocking engine behind the beer catalog API.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Handler layer (routing, request binding: out of tree)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              brewery-service (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │  BeerService<S: BeerStore>                                      │   │
//! │  │  ├── listing / list        filter → concurrent scan + count    │   │
//! │  │  ├── by_id / by_upc        point lookups                       │   │
//! │  │  ├── create                validate → insert                   │   │
//! │  │  ├── update                fetch → branch → replace            │   │
//! │  │  └── delete                conditional remove                  │   │
//! │  │                                                                 │   │
//! │  │  ServiceConfig · ServiceError · telemetry                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                             │                                   │
//! │       ▼                             ▼                                   │
//! │  brewery-core (rules)          brewery-db (BeerStore, SQLite)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use brewery_service::{telemetry, BeerService, ListingQuery, ServiceConfig};
//! use brewery_db::Database;
//!
//! telemetry::init_tracing();
//! let config = ServiceConfig::from_env()?;
//! let db = Database::new(config.db_config()).await?;
//! let service = BeerService::new(db.beers()).with_config(&config)?;
//!
//! let page = service.listing(ListingQuery::all().name("Galaxy Cat")).await?;
//! ```

pub mod config;
pub mod error;
pub mod service;
pub mod telemetry;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ErrorCode, ServiceError, ServiceResult};
pub use service::{BeerService, ListingQuery};

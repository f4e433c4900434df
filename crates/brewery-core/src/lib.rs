//! # brewery-core: Pure Catalog Logic
//!
//! This crate holds every rule of the brewery catalog that can be expressed
//! without touching a database: the record and DTO shapes, filter
//! resolution, page arithmetic, and payload validation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Brewery Catalog Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Handler layer (HTTP routing, out of tree)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ BeerDto / PageResult<BeerDto>          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          brewery-service (BeerService: listing & mutations)     │   │
//! │  └──────────────┬──────────────────────────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────┐   ┌───────────▼───────────────┐   │
//! │  │  ★ brewery-core (THIS CRATE) ★   │   │  brewery-db (BeerStore)   │   │
//! │  │  types · dto · filter · page    │   │  SQLite pool + queries    │   │
//! │  │  money · validation · error     │   └───────────────────────────┘   │
//! │  │  NO I/O • PURE FUNCTIONS        │                                    │
//! │  └─────────────────────────────────┘                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (`Beer`, `BeerStyle`, `BeerDraft`, `DeleteOutcome`)
//! - [`dto`] - External representation and the record <-> DTO mapper
//! - [`filter`] - Filter resolution into one of four query plans
//! - [`page`] - Page requests and page containers
//! - [`money`] - Integer-cent prices with decimal text formatting
//! - [`validation`] - Payload validation rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brewery_core::filter::{resolve, FilterCriteria};
//! use brewery_core::BeerStyle;
//!
//! let criteria = resolve(None, Some(BeerStyle::Wheat));
//! assert!(matches!(criteria, FilterCriteria::ByStyle(BeerStyle::Wheat)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod filter;
pub mod money;
pub mod page;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dto::{BeerDto, Inventory};
pub use error::{ValidationError, ValidationResult};
pub use filter::{FilterCriteria, NameFilter, NameMatch};
pub use money::Money;
pub use page::{PageRequest, PageResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when the caller gives none, or gives an unusable one.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

/// Largest page size honoured before falling back to the default.
///
/// Keeps a single listing from materialising the whole catalog.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum length of a beer name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a UPC.
pub const MAX_UPC_LENGTH: usize = 25;

//! # Beer DTO and Mapper
//!
//! The externally visible shape of a beer, and the side-effect-free mapping
//! between it and the internal record.
//!
//! ## Why DTO?
//! - Decouples the record from the API contract
//! - Output-only fields (`id`, timestamps) are ignored on input
//! - Price travels as decimal text, style as its tag name
//!
//! ## Mapping Directions
//! ```text
//! Beer ──► BeerDto::from_beer(beer, Inventory::Include | Omit)
//!
//! BeerDto ──► BeerDto::to_draft()              (create: UPC required)
//!         └─► BeerDto::to_replacement(&stored) (update: stored UPC kept)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::types::{Beer, BeerDraft, BeerId};
use crate::validation;

/// Whether a projection carries quantity-on-hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Inventory {
    Include,
    #[default]
    Omit,
}

impl From<bool> for Inventory {
    fn from(include: bool) -> Self {
        if include {
            Inventory::Include
        } else {
            Inventory::Omit
        }
    }
}

/// Beer DTO for the handler layer.
///
/// Every field is optional so that an incomplete payload reaches
/// validation, where it is rejected with a field-level error, instead of
/// failing opaquely at deserialization.
///
/// ```json
/// {
///   "id": 7,
///   "beerName": "Galaxy Cat",
///   "beerStyle": "WHEAT",
///   "upc": "0631234200036",
///   "price": "12.50",
///   "quantityOnHand": 48,
///   "createdDate": "2026-10-16T09:00:00Z",
///   "lastModifiedDate": "2026-10-16T09:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BeerDto {
    /// Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<BeerId>,

    #[serde(default)]
    pub beer_name: Option<String>,

    /// Style tag, e.g. `"PALE_ALE"`.
    #[serde(default)]
    pub beer_style: Option<String>,

    #[serde(default)]
    pub upc: Option<String>,

    /// Decimal text, e.g. `"12.50"`.
    #[serde(default)]
    pub price: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub quantity_on_hand: Option<i64>,

    /// Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub created_date: Option<DateTime<Utc>>,

    /// Output only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>", optional)]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl BeerDto {
    /// Maps a record to its external shape.
    pub fn from_beer(beer: Beer, inventory: Inventory) -> Self {
        let quantity_on_hand = match inventory {
            Inventory::Include => beer.quantity_on_hand,
            Inventory::Omit => None,
        };

        BeerDto {
            id: Some(beer.id),
            beer_name: Some(beer.name),
            beer_style: Some(beer.style.as_str().to_string()),
            upc: Some(beer.upc),
            price: Some(beer.price.to_string()),
            quantity_on_hand,
            created_date: Some(beer.created_at),
            last_modified_date: Some(beer.updated_at),
        }
    }

    /// Validated draft for a create. See [`validation::validate_new_beer`].
    pub fn to_draft(&self) -> ValidationResult<BeerDraft> {
        validation::validate_new_beer(self)
    }

    /// Validated replacement body for an update of `stored`.
    pub fn to_replacement(&self, stored: &Beer) -> ValidationResult<BeerDraft> {
        validation::validate_replacement(self, stored)
    }
}

/// Full projection, inventory included.
impl From<Beer> for BeerDto {
    fn from(beer: Beer) -> Self {
        BeerDto::from_beer(beer, Inventory::Include)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Domain Types
//!
//! Catalog records used throughout the brewery workspace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐           ┌─────────────────────┐             │
//! │  │     BeerDraft       │  insert   │       Beer          │             │
//! │  │  ─────────────────  │ ────────► │  ─────────────────  │             │
//! │  │  name               │  (store)  │  id (assigned)      │             │
//! │  │  style              │           │  name, style, upc   │             │
//! │  │  upc                │ ◄──────── │  price              │             │
//! │  │  price              │   draft() │  quantity_on_hand   │             │
//! │  │  quantity_on_hand   │           │  created_at         │             │
//! │  └─────────────────────┘           │  updated_at         │             │
//! │                                    └─────────────────────┘             │
//! │  ┌─────────────────────┐                                               │
//! │  │     BeerStyle       │  LAGER · PILSNER · STOUT · GOSE · PORTER      │
//! │  │  (closed set)       │  ALE · WHEAT · IPA · PALE_ALE · SAISON        │
//! │  │                     │  + UNKNOWN for unrecognised stored values     │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A record that has not been persisted has no identity, so it is a
//! [`BeerDraft`]. Only the store turns a draft into a [`Beer`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// Surrogate identity assigned by the store.
pub type BeerId = i64;

// =============================================================================
// Beer Style
// =============================================================================

/// The style of a beer.
///
/// ## Forward Compatibility
/// Inbound text is parsed strictly ([`FromStr`], and serde rejects
/// `"UNKNOWN"` too), so a client can only ever write or filter by a known
/// style. Values read back from the store go through
/// [`BeerStyle::from_stored`], which maps anything unrecognised (a style
/// added by a newer deployment, say) to [`BeerStyle::Unknown`] instead of
/// failing the whole read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
    /// Stored value this build does not recognise.
    #[serde(skip_deserializing)]
    Unknown,
}

impl BeerStyle {
    /// Every style a client may write, in declaration order.
    pub const KNOWN: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    /// Textual tag, as stored and as exposed in DTOs.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
            BeerStyle::Unknown => "UNKNOWN",
        }
    }

    /// Lenient conversion for values coming out of the store.
    pub fn from_stored(tag: &str) -> Self {
        tag.parse().unwrap_or(BeerStyle::Unknown)
    }

    /// Whether this style may be written by a client.
    pub const fn is_known(&self) -> bool {
        !matches!(self, BeerStyle::Unknown)
    }
}

impl FromStr for BeerStyle {
    type Err = ValidationError;

    /// Strict parse of a style tag. `UNKNOWN` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        BeerStyle::KNOWN
            .iter()
            .copied()
            .find(|style| style.as_str() == tag)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "beerStyle".to_string(),
                allowed: BeerStyle::KNOWN
                    .iter()
                    .map(|style| style.as_str().to_string())
                    .collect(),
            })
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Beer Draft
// =============================================================================

/// A beer record body without identity or store-managed timestamps.
///
/// Used for inserts and for full replacement of an existing record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerDraft {
    pub name: String,
    pub style: BeerStyle,
    /// Externally assigned product code.
    pub upc: String,
    pub price: Money,
    /// Units on hand. `None` when inventory is not tracked for the beer.
    pub quantity_on_hand: Option<i64>,
}

// =============================================================================
// Beer
// =============================================================================

/// A persisted beer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beer {
    /// Identity assigned by the store on insert.
    pub id: BeerId,
    pub name: String,
    pub style: BeerStyle,
    /// Externally assigned product code. Never changes once set.
    pub upc: String,
    pub price: Money,
    /// Units on hand, when inventory detail was requested.
    pub quantity_on_hand: Option<i64>,
    /// When the record was first written.
    pub created_at: DateTime<Utc>,
    /// When the record was last written.
    pub updated_at: DateTime<Utc>,
}

impl Beer {
    /// Returns the record body, dropping identity and timestamps.
    pub fn draft(&self) -> BeerDraft {
        BeerDraft {
            name: self.name.clone(),
            style: self.style,
            upc: self.upc.clone(),
            price: self.price,
            quantity_on_hand: self.quantity_on_hand,
        }
    }

    /// Projection without inventory detail.
    pub fn without_inventory(mut self) -> Self {
        self.quantity_on_hand = None;
        self
    }
}

// =============================================================================
// Delete Outcome
// =============================================================================

/// Result of an existence-checked delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// The record existed and this call removed it.
    Deleted,
    /// No record with that id existed when the delete ran.
    NotFound,
}

impl DeleteOutcome {
    /// `true` when the call removed a record.
    pub const fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted)
    }
}

impl From<bool> for DeleteOutcome {
    fn from(removed: bool) -> Self {
        if removed {
            DeleteOutcome::Deleted
        } else {
            DeleteOutcome::NotFound
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

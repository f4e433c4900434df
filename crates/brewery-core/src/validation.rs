//! # Validation Module
//!
//! Payload validation for beer create and update requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Handler layer (out of tree)                                  │
//! │  └── Request binding, shape checks                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: BeerService (brewery-service)                                │
//! │  └── THIS MODULE: field rules, run on every create/update even if      │
//! │      layer 1 was skipped                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── UNIQUE(upc)                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brewery_core::validation::{validate_beer_name, validate_upc};
//!
//! assert!(validate_beer_name("Galaxy Cat").is_ok());
//! assert!(validate_upc("0631234200036").is_ok());
//! assert!(validate_upc("").is_err());
//! ```

use crate::dto::BeerDto;
use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{Beer, BeerDraft, BeerStyle};
use crate::{MAX_NAME_LENGTH, MAX_UPC_LENGTH};

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a beer name.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_NAME_LENGTH` characters
pub fn validate_beer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("beerName"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "beerName".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a UPC.
///
/// ## Rules
/// - Must not be blank
/// - At most `MAX_UPC_LENGTH` characters
/// - Letters, digits and hyphens only
pub fn validate_upc(upc: &str) -> ValidationResult<()> {
    let upc = upc.trim();

    if upc.is_empty() {
        return Err(ValidationError::required("upc"));
    }

    if upc.len() > MAX_UPC_LENGTH {
        return Err(ValidationError::TooLong {
            field: "upc".to_string(),
            max: MAX_UPC_LENGTH,
        });
    }

    if !upc.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ValidationError::invalid_format(
            "upc",
            "must contain only letters, digits, and hyphens",
        ));
    }

    Ok(())
}

/// Parses and validates a price given as decimal text.
///
/// Zero is allowed; negative prices are not.
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price: Money = text.parse()?;

    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(price)
}

/// Parses a style tag. Only known styles are accepted.
pub fn parse_style(text: &str) -> ValidationResult<BeerStyle> {
    if text.trim().is_empty() {
        return Err(ValidationError::required("beerStyle"));
    }
    text.parse()
}

/// Validates a quantity on hand.
pub fn validate_quantity_on_hand(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantityOnHand".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a create payload and maps it to a draft record.
///
/// Name, style, UPC and price are required. `id` and the timestamps on the
/// DTO are ignored.
pub fn validate_new_beer(dto: &BeerDto) -> ValidationResult<BeerDraft> {
    let upc = required(&dto.upc, "upc")?;
    validate_upc(upc)?;

    let (name, style, price) = validate_mutable_fields(dto)?;

    Ok(BeerDraft {
        name,
        style,
        upc: upc.trim().to_string(),
        price,
        quantity_on_hand: dto.quantity_on_hand,
    })
}

/// Validates an update payload against the record it will replace.
///
/// The stored UPC always wins; whatever UPC the payload carries is ignored.
/// A payload without `quantityOnHand` keeps the stored quantity.
pub fn validate_replacement(dto: &BeerDto, existing: &Beer) -> ValidationResult<BeerDraft> {
    let (name, style, price) = validate_mutable_fields(dto)?;

    Ok(BeerDraft {
        name,
        style,
        upc: existing.upc.clone(),
        price,
        quantity_on_hand: dto.quantity_on_hand.or(existing.quantity_on_hand),
    })
}

fn validate_mutable_fields(dto: &BeerDto) -> ValidationResult<(String, BeerStyle, Money)> {
    let name = required(&dto.beer_name, "beerName")?;
    validate_beer_name(name)?;

    let style = parse_style(required(&dto.beer_style, "beerStyle")?)?;
    let price = parse_price(required(&dto.price, "price")?)?;

    if let Some(quantity) = dto.quantity_on_hand {
        validate_quantity_on_hand(quantity)?;
    }

    Ok((name.trim().to_string(), style, price))
}

fn required<'a>(value: &'a Option<String>, field: &str) -> ValidationResult<&'a str> {
    match value.as_deref() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(ValidationError::required(field)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

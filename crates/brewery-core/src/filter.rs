//! # Filter Resolution
//!
//! Turns the optional `name` / `style` listing filters into exactly one of
//! four query plans.
//!
//! ## Resolution Table
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────────────────┐
//! │  name        │  style       │  plan                                    │
//! ├──────────────┼──────────────┼──────────────────────────────────────────┤
//! │  absent      │  absent      │  FilterCriteria::All                     │
//! │  present     │  absent      │  FilterCriteria::ByName                  │
//! │  absent      │  present     │  FilterCriteria::ByStyle                 │
//! │  present     │  present     │  FilterCriteria::ByNameAndStyle  (AND)   │
//! └──────────────┴──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! A blank name (empty or whitespace only) counts as absent.
//!
//! ## Name Matching
//! Matching is case-sensitive. The default mode is [`NameMatch::Exact`];
//! prefix and substring matching are opt-in through configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Beer, BeerStyle};

// =============================================================================
// Name Match Policy
// =============================================================================

/// How a name filter is compared against stored names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameMatch {
    /// Whole name, case-sensitive.
    #[default]
    Exact,
    /// Stored name starts with the filter value.
    Prefix,
    /// Stored name contains the filter value.
    Contains,
}

impl FromStr for NameMatch {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(NameMatch::Exact),
            "prefix" => Ok(NameMatch::Prefix),
            "contains" => Ok(NameMatch::Contains),
            _ => Err(ValidationError::NotAllowed {
                field: "nameMatch".to_string(),
                allowed: vec![
                    "exact".to_string(),
                    "prefix".to_string(),
                    "contains".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Name Filter
// =============================================================================

/// A name filter value together with its match mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameFilter {
    pub value: String,
    pub mode: NameMatch,
}

impl NameFilter {
    /// Creates an exact-match filter.
    pub fn exact(value: impl Into<String>) -> Self {
        NameFilter {
            value: value.into(),
            mode: NameMatch::Exact,
        }
    }

    /// SQLite `GLOB` pattern equivalent to this filter.
    ///
    /// `GLOB` is case-sensitive, unlike `LIKE`, so one operator covers all
    /// three modes. The metacharacters `*`, `?` and `[` in the value are
    /// bracket-escaped so they only ever match themselves.
    ///
    /// ```rust
    /// use brewery_core::filter::{NameFilter, NameMatch};
    ///
    /// let filter = NameFilter { value: "Cat*".into(), mode: NameMatch::Prefix };
    /// assert_eq!(filter.glob_pattern(), "Cat[*]*");
    /// ```
    pub fn glob_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.value.len() + 2);
        for c in self.value.chars() {
            match c {
                '*' => escaped.push_str("[*]"),
                '?' => escaped.push_str("[?]"),
                '[' => escaped.push_str("[[]"),
                other => escaped.push(other),
            }
        }

        match self.mode {
            NameMatch::Exact => escaped,
            NameMatch::Prefix => format!("{}*", escaped),
            NameMatch::Contains => format!("*{}*", escaped),
        }
    }

    /// In-memory equivalent of [`NameFilter::glob_pattern`].
    pub fn matches(&self, name: &str) -> bool {
        match self.mode {
            NameMatch::Exact => name == self.value,
            NameMatch::Prefix => name.starts_with(&self.value),
            NameMatch::Contains => name.contains(&self.value),
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The resolved query plan for one listing request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilterCriteria {
    /// No filter: every record.
    All,
    ByName(NameFilter),
    ByStyle(BeerStyle),
    /// Both filters, combined with AND.
    ByNameAndStyle(NameFilter, BeerStyle),
}

impl FilterCriteria {
    /// Short plan label for logs.
    pub const fn plan(&self) -> &'static str {
        match self {
            FilterCriteria::All => "all",
            FilterCriteria::ByName(_) => "by_name",
            FilterCriteria::ByStyle(_) => "by_style",
            FilterCriteria::ByNameAndStyle(_, _) => "by_name_and_style",
        }
    }

    /// Whether a record satisfies this plan.
    ///
    /// Agrees with the store's SQL: an `Unknown` style filter matches no
    /// record, since unrecognised tags are stored as their original text.
    pub fn matches(&self, beer: &Beer) -> bool {
        match self {
            FilterCriteria::All => true,
            FilterCriteria::ByName(name) => name.matches(&beer.name),
            FilterCriteria::ByStyle(style) => style.is_known() && beer.style == *style,
            FilterCriteria::ByNameAndStyle(name, style) => {
                style.is_known() && beer.style == *style && name.matches(&beer.name)
            }
        }
    }
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria::All
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves optional filters with exact name matching.
pub fn resolve(name: Option<&str>, style: Option<BeerStyle>) -> FilterCriteria {
    resolve_with(name, style, NameMatch::Exact)
}

/// Resolves optional filters with the given name match mode.
///
/// Pure; never fails.
pub fn resolve_with(name: Option<&str>, style: Option<BeerStyle>, mode: NameMatch) -> FilterCriteria {
    let name = name
        .filter(|value| !value.trim().is_empty())
        .map(|value| NameFilter {
            value: value.to_string(),
            mode,
        });

    match (name, style) {
        (None, None) => FilterCriteria::All,
        (Some(name), None) => FilterCriteria::ByName(name),
        (None, Some(style)) => FilterCriteria::ByStyle(style),
        (Some(name), Some(style)) => FilterCriteria::ByNameAndStyle(name, style),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn beer(name: &str, style: BeerStyle) -> Beer {
        let now = Utc::now();
        Beer {
            id: 1,
            name: name.to_string(),
            style,
            upc: "0631234200036".to_string(),
            price: Money::from_cents(1250),
            quantity_on_hand: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_resolve_all_four_plans() {
        assert_eq!(resolve(None, None), FilterCriteria::All);
        assert_eq!(
            resolve(Some("Galaxy Cat"), None),
            FilterCriteria::ByName(NameFilter::exact("Galaxy Cat"))
        );
        assert_eq!(
            resolve(None, Some(BeerStyle::Wheat)),
            FilterCriteria::ByStyle(BeerStyle::Wheat)
        );
        assert_eq!(
            resolve(Some("Galaxy Cat"), Some(BeerStyle::Wheat)),
            FilterCriteria::ByNameAndStyle(NameFilter::exact("Galaxy Cat"), BeerStyle::Wheat)
        );
    }

    #[test]
    fn test_blank_name_counts_as_absent() {
        assert_eq!(resolve(Some(""), None), FilterCriteria::All);
        assert_eq!(
            resolve(Some("   "), Some(BeerStyle::Ale)),
            FilterCriteria::ByStyle(BeerStyle::Ale)
        );
    }

    #[test]
    fn test_resolve_with_carries_mode() {
        let criteria = resolve_with(Some("Gal"), None, NameMatch::Prefix);
        match criteria {
            FilterCriteria::ByName(filter) => assert_eq!(filter.mode, NameMatch::Prefix),
            other => panic!("unexpected plan {:?}", other),
        }
    }

    #[test]
    fn test_name_and_style_is_and_not_or() {
        let criteria = resolve(Some("Galaxy Cat"), Some(BeerStyle::Ipa));
        assert!(!criteria.matches(&beer("Galaxy Cat", BeerStyle::Wheat)));
        assert!(!criteria.matches(&beer("Pinball Porter", BeerStyle::Ipa)));
        assert!(criteria.matches(&beer("Galaxy Cat", BeerStyle::Ipa)));
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let criteria = resolve(Some("galaxy cat"), None);
        assert!(!criteria.matches(&beer("Galaxy Cat", BeerStyle::Wheat)));
    }

    #[test]
    fn test_glob_patterns() {
        assert_eq!(NameFilter::exact("Galaxy Cat").glob_pattern(), "Galaxy Cat");
        assert_eq!(NameFilter::exact("What?").glob_pattern(), "What[?]");
        assert_eq!(NameFilter::exact("[x]").glob_pattern(), "[[]x]");

        let contains = NameFilter {
            value: "Cat".to_string(),
            mode: NameMatch::Contains,
        };
        assert_eq!(contains.glob_pattern(), "*Cat*");
        assert!(contains.matches("Galaxy Cat"));
    }

    #[test]
    fn test_name_match_from_str() {
        assert_eq!("Prefix".parse::<NameMatch>().unwrap(), NameMatch::Prefix);
        assert!("fuzzy".parse::<NameMatch>().is_err());
    }

    #[test]
    fn test_plan_labels() {
        assert_eq!(FilterCriteria::All.plan(), "all");
        assert_eq!(
            resolve(Some("x"), Some(BeerStyle::Ale)).plan(),
            "by_name_and_style"
        );
    }

    #[test]
    fn test_unknown_style_filter_matches_nothing() {
        let stored_sour = beer("Sour Patch", BeerStyle::from_stored("SOUR"));
        assert_eq!(stored_sour.style, BeerStyle::Unknown);

        assert!(!resolve(None, Some(BeerStyle::Unknown)).matches(&stored_sour));
        assert!(!resolve(Some("Sour Patch"), Some(BeerStyle::Unknown)).matches(&stored_sour));
        assert!(resolve(Some("Sour Patch"), None).matches(&stored_sour));
    }
}

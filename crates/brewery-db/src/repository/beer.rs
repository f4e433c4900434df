//! # Beer Repository
//!
//! SQLite implementation of the [`BeerStore`] port.
//!
//! ## Query Plans
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  FilterCriteria → SQL                                   │
//! │                                                                         │
//! │  All              →  (no WHERE)                                        │
//! │  ByName           →  WHERE name GLOB ?                                 │
//! │  ByStyle          →  WHERE style = ?                                   │
//! │  ByNameAndStyle   →  WHERE name GLOB ? AND style = ?                   │
//! │                                                                         │
//! │  scan:   SELECT ... <where> ORDER BY id ASC LIMIT ? OFFSET ?           │
//! │  count:  SELECT COUNT(*) FROM beers <where>                            │
//! │                                                                         │
//! │  GLOB is case-sensitive; the pattern comes from                        │
//! │  NameFilter::glob_pattern() (exact, prefix or contains).               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every statement is a static string chosen by plan, so no SQL text is ever
//! built from request data.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::stream::{BoxStream, StreamExt};
use sqlx::SqlitePool;
use tracing::debug;

use brewery_core::{Beer, BeerDraft, BeerId, BeerStyle, FilterCriteria, Money};

use crate::error::{DbError, DbResult};
use crate::store::BeerStore;

// =============================================================================
// SQL
// =============================================================================

const FIND_BY_ID: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    WHERE id = ?
"#;

const FIND_BY_UPC: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    WHERE upc = ?
    ORDER BY id ASC
    LIMIT 1
"#;

const SCAN_ALL: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    ORDER BY id ASC
    LIMIT ? OFFSET ?
"#;

const SCAN_BY_NAME: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    WHERE name GLOB ?
    ORDER BY id ASC
    LIMIT ? OFFSET ?
"#;

const SCAN_BY_STYLE: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    WHERE style = ?
    ORDER BY id ASC
    LIMIT ? OFFSET ?
"#;

const SCAN_BY_NAME_AND_STYLE: &str = r#"
    SELECT id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
    FROM beers
    WHERE name GLOB ? AND style = ?
    ORDER BY id ASC
    LIMIT ? OFFSET ?
"#;

const INSERT: &str = r#"
    INSERT INTO beers (name, style, upc, price_cents, quantity_on_hand, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?, ?)
    RETURNING id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
"#;

// Conditional on the id: a missing record matches no row and nothing is written.
const REPLACE: &str = r#"
    UPDATE beers
    SET name = ?, style = ?, upc = ?, price_cents = ?, quantity_on_hand = ?, updated_at = ?
    WHERE id = ?
    RETURNING id, name, style, upc, price_cents, quantity_on_hand, created_at, updated_at
"#;

const DELETE: &str = "DELETE FROM beers WHERE id = ?";

const COUNT_ALL: &str = "SELECT COUNT(*) FROM beers";
const COUNT_BY_NAME: &str = "SELECT COUNT(*) FROM beers WHERE name GLOB ?";
const COUNT_BY_STYLE: &str = "SELECT COUNT(*) FROM beers WHERE style = ?";
const COUNT_BY_NAME_AND_STYLE: &str =
    "SELECT COUNT(*) FROM beers WHERE name GLOB ? AND style = ?";

// =============================================================================
// Row Mapping
// =============================================================================

/// One row of the `beers` table, as stored.
#[derive(Debug, sqlx::FromRow)]
struct BeerRow {
    id: i64,
    name: String,
    style: String,
    upc: String,
    price_cents: i64,
    quantity_on_hand: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BeerRow> for Beer {
    fn from(row: BeerRow) -> Self {
        Beer {
            id: row.id,
            name: row.name,
            style: BeerStyle::from_stored(&row.style),
            upc: row.upc,
            price: Money::from_cents(row.price_cents),
            quantity_on_hand: row.quantity_on_hand,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for beer records.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.beers();
///
/// let created = repo.insert(&draft).await?;
/// let found = repo.find_by_upc(&created.upc).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BeerRepository {
    pool: SqlitePool,
}

impl BeerRepository {
    /// Creates a new BeerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BeerRepository { pool }
    }

    /// Maps a unique violation on insert to the UPC that caused it.
    fn duplicate_upc(err: sqlx::Error, upc: &str) -> DbError {
        match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, upc),
            other => other,
        }
    }
}

#[async_trait]
impl BeerStore for BeerRepository {
    async fn find_by_id(&self, id: BeerId) -> DbResult<Option<Beer>> {
        debug!(id, "Fetching beer by id");

        let row = sqlx::query_as::<_, BeerRow>(FIND_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Beer::from))
    }

    async fn find_by_upc(&self, upc: &str) -> DbResult<Option<Beer>> {
        debug!(upc = %upc, "Fetching beer by upc");

        let row = sqlx::query_as::<_, BeerRow>(FIND_BY_UPC)
            .bind(upc)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Beer::from))
    }

    fn scan(
        &self,
        criteria: &FilterCriteria,
        offset: i64,
        limit: i64,
    ) -> BoxStream<'_, DbResult<Beer>> {
        debug!(plan = criteria.plan(), offset, limit, "Scanning beers");

        let query = match criteria {
            FilterCriteria::All => sqlx::query_as::<_, BeerRow>(SCAN_ALL),
            FilterCriteria::ByName(name) => {
                sqlx::query_as::<_, BeerRow>(SCAN_BY_NAME).bind(name.glob_pattern())
            }
            FilterCriteria::ByStyle(style) => {
                sqlx::query_as::<_, BeerRow>(SCAN_BY_STYLE).bind(style.as_str())
            }
            FilterCriteria::ByNameAndStyle(name, style) => {
                sqlx::query_as::<_, BeerRow>(SCAN_BY_NAME_AND_STYLE)
                    .bind(name.glob_pattern())
                    .bind(style.as_str())
            }
        };

        query
            .bind(limit)
            .bind(offset)
            .fetch(&self.pool)
            .map(|row| row.map(Beer::from).map_err(DbError::from))
            .boxed()
    }

    async fn count(&self, criteria: &FilterCriteria) -> DbResult<i64> {
        let query = match criteria {
            FilterCriteria::All => sqlx::query_scalar::<_, i64>(COUNT_ALL),
            FilterCriteria::ByName(name) => {
                sqlx::query_scalar::<_, i64>(COUNT_BY_NAME).bind(name.glob_pattern())
            }
            FilterCriteria::ByStyle(style) => {
                sqlx::query_scalar::<_, i64>(COUNT_BY_STYLE).bind(style.as_str())
            }
            FilterCriteria::ByNameAndStyle(name, style) => {
                sqlx::query_scalar::<_, i64>(COUNT_BY_NAME_AND_STYLE)
                    .bind(name.glob_pattern())
                    .bind(style.as_str())
            }
        };

        let total = query.fetch_one(&self.pool).await?;

        debug!(plan = criteria.plan(), total, "Counted beers");
        Ok(total)
    }

    async fn insert(&self, draft: &BeerDraft) -> DbResult<Beer> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, BeerRow>(INSERT)
            .bind(&draft.name)
            .bind(draft.style.as_str())
            .bind(&draft.upc)
            .bind(draft.price.cents())
            .bind(draft.quantity_on_hand)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| Self::duplicate_upc(e, &draft.upc))?;

        debug!(id = row.id, upc = %row.upc, "Inserted beer");
        Ok(Beer::from(row))
    }

    async fn replace(&self, id: BeerId, draft: &BeerDraft) -> DbResult<Option<Beer>> {
        let row = sqlx::query_as::<_, BeerRow>(REPLACE)
            .bind(&draft.name)
            .bind(draft.style.as_str())
            .bind(&draft.upc)
            .bind(draft.price.cents())
            .bind(draft.quantity_on_hand)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Self::duplicate_upc(e, &draft.upc))?;

        debug!(id, replaced = row.is_some(), "Replaced beer");
        Ok(row.map(Beer::from))
    }

    async fn delete(&self, id: BeerId) -> DbResult<bool> {
        let result = sqlx::query(DELETE)
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(id, removed, "Deleted beer");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use brewery_core::filter::{resolve, resolve_with, NameMatch};
    use futures_util::TryStreamExt;

    async fn repo() -> BeerRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.beers()
    }

    fn draft(name: &str, style: BeerStyle, upc: &str) -> BeerDraft {
        BeerDraft {
            name: name.to_string(),
            style,
            upc: upc.to_string(),
            price: Money::from_cents(1250),
            quantity_on_hand: Some(24),
        }
    }

    async fn collect(repo: &BeerRepository, criteria: &FilterCriteria, offset: i64, limit: i64) -> Vec<Beer> {
        repo.scan(criteria, offset, limit).try_collect().await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let repo = repo().await;

        let beer = repo
            .insert(&draft("Galaxy Cat", BeerStyle::Wheat, "0631234200036"))
            .await
            .unwrap();

        assert!(beer.id > 0);
        assert_eq!(beer.name, "Galaxy Cat");
        assert_eq!(beer.style, BeerStyle::Wheat);
        assert_eq!(beer.price.cents(), 1250);
        assert_eq!(beer.created_at, beer.updated_at);
    }

    #[tokio::test]
    async fn test_find_by_id_and_upc() {
        let repo = repo().await;
        let beer = repo
            .insert(&draft("Galaxy Cat", BeerStyle::Wheat, "0631234200036"))
            .await
            .unwrap();

        assert_eq!(repo.find_by_id(beer.id).await.unwrap(), Some(beer.clone()));
        assert_eq!(
            repo.find_by_upc("0631234200036").await.unwrap().map(|b| b.id),
            Some(beer.id)
        );
        assert!(repo.find_by_id(999).await.unwrap().is_none());
        assert!(repo.find_by_upc("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_upc_is_unique_violation() {
        let repo = repo().await;
        repo.insert(&draft("Galaxy Cat", BeerStyle::Wheat, "0631234200036"))
            .await
            .unwrap();

        let err = repo
            .insert(&draft("Copy Cat", BeerStyle::Ale, "0631234200036"))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "upc");
                assert_eq!(value, "0631234200036");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_scan_orders_by_id_and_windows() {
        let repo = repo().await;
        for i in 0..7 {
            repo.insert(&draft(&format!("Beer {}", i), BeerStyle::Lager, &format!("UPC-{}", i)))
                .await
                .unwrap();
        }

        let all = resolve(None, None);
        let window = collect(&repo, &all, 2, 3).await;
        let names: Vec<_> = window.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Beer 2", "Beer 3", "Beer 4"]);
        assert!(window.windows(2).all(|pair| pair[0].id < pair[1].id));

        assert!(collect(&repo, &all, 50, 3).await.is_empty());
        assert_eq!(repo.count(&all).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_scan_and_count_agree_per_plan() {
        let repo = repo().await;
        repo.insert(&draft("Galaxy Cat", BeerStyle::Wheat, "1")).await.unwrap();
        repo.insert(&draft("Galaxy Cat", BeerStyle::Ipa, "2")).await.unwrap();
        repo.insert(&draft("Pinball Porter", BeerStyle::Porter, "3")).await.unwrap();
        repo.insert(&draft("Sunshine City", BeerStyle::Wheat, "4")).await.unwrap();

        let cases = [
            (resolve(None, None), 4),
            (resolve(Some("Galaxy Cat"), None), 2),
            (resolve(None, Some(BeerStyle::Wheat)), 2),
            (resolve(Some("Galaxy Cat"), Some(BeerStyle::Wheat)), 1),
            (resolve(Some("Galaxy Cat"), Some(BeerStyle::Porter)), 0),
        ];

        for (criteria, expected) in cases {
            let rows = collect(&repo, &criteria, 0, 100).await;
            assert_eq!(rows.len() as i64, expected, "plan {}", criteria.plan());
            assert_eq!(repo.count(&criteria).await.unwrap(), expected);
            assert!(rows.iter().all(|b| criteria.matches(b)));
        }
    }

    #[tokio::test]
    async fn test_name_filter_modes_are_case_sensitive() {
        let repo = repo().await;
        repo.insert(&draft("Galaxy Cat", BeerStyle::Wheat, "1")).await.unwrap();
        repo.insert(&draft("Galaxy Cat*", BeerStyle::Wheat, "2")).await.unwrap();

        let exact_lower = resolve(Some("galaxy cat"), None);
        assert_eq!(repo.count(&exact_lower).await.unwrap(), 0);

        let prefix = resolve_with(Some("Galaxy"), None, NameMatch::Prefix);
        assert_eq!(repo.count(&prefix).await.unwrap(), 2);

        let contains = resolve_with(Some("Cat*"), None, NameMatch::Contains);
        assert_eq!(repo.count(&contains).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unknown_stored_style_reads_back_as_unknown() {
        let repo = repo().await;
        let beer = repo.insert(&draft("Sour Puss", BeerStyle::Ale, "1")).await.unwrap();

        sqlx::query("UPDATE beers SET style = 'SOUR' WHERE id = ?")
            .bind(beer.id)
            .execute(&repo.pool)
            .await
            .unwrap();

        let found = repo.find_by_id(beer.id).await.unwrap().unwrap();
        assert_eq!(found.style, BeerStyle::Unknown);

        let by_unknown = resolve(None, Some(BeerStyle::Unknown));
        assert_eq!(repo.count(&by_unknown).await.unwrap(), 0);
        assert!(collect(&repo, &by_unknown, 0, 10).await.is_empty());
        assert!(!by_unknown.matches(&found));
    }

    #[tokio::test]
    async fn test_replace_existing_and_missing() {
        let repo = repo().await;
        let beer = repo
            .insert(&draft("Galaxy Cat", BeerStyle::Wheat, "0631234200036"))
            .await
            .unwrap();

        let mut changes = beer.draft();
        changes.name = "Galaxy Cat:UPDATED".to_string();
        changes.price = Money::from_cents(999);

        let updated = repo.replace(beer.id, &changes).await.unwrap().unwrap();
        assert_eq!(updated.id, beer.id);
        assert_eq!(updated.name, "Galaxy Cat:UPDATED");
        assert_eq!(updated.created_at, beer.created_at);
        assert!(updated.updated_at >= beer.updated_at);

        assert!(repo.replace(999, &changes).await.unwrap().is_none());
        assert_eq!(repo.count(&FilterCriteria::All).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_removed() {
        let repo = repo().await;
        let beer = repo
            .insert(&draft("Galaxy Cat", BeerStyle::Wheat, "0631234200036"))
            .await
            .unwrap();

        assert!(repo.delete(beer.id).await.unwrap());
        assert!(!repo.delete(beer.id).await.unwrap());
        assert!(repo.find_by_id(beer.id).await.unwrap().is_none());
    }
}

//! # Record Store Port
//!
//! The persistence operations the engine relies on, as a trait.
//!
//! ```text
//! ┌──────────────────┐        ┌──────────────────────┐
//! │   BeerService    │ ─────► │  dyn / impl BeerStore │
//! └──────────────────┘        └──────────┬───────────┘
//!                                        │
//!                     ┌──────────────────┼──────────────────┐
//!                     ▼                                     ▼
//!           BeerRepository (SQLite)              test doubles (failing,
//!                                                 counting, ...)
//! ```
//!
//! Every method is a single store round trip. Absence is `Option` / `false`,
//! never an error; errors mean the store itself failed.

use async_trait::async_trait;
use futures_util::stream::BoxStream;

use brewery_core::{Beer, BeerDraft, BeerId, FilterCriteria};

use crate::error::DbResult;

/// Port for beer persistence.
#[async_trait]
pub trait BeerStore: Send + Sync {
    /// Point read by identity.
    async fn find_by_id(&self, id: BeerId) -> DbResult<Option<Beer>>;

    /// Point read by UPC. When several records share a UPC the lowest id wins.
    async fn find_by_upc(&self, upc: &str) -> DbResult<Option<Beer>>;

    /// Lazily streams at most `limit` matching records, skipping `offset`,
    /// in ascending id order.
    ///
    /// The stream is finite and cannot be restarted.
    fn scan(&self, criteria: &FilterCriteria, offset: i64, limit: i64)
        -> BoxStream<'_, DbResult<Beer>>;

    /// Number of records matching `criteria`.
    async fn count(&self, criteria: &FilterCriteria) -> DbResult<i64>;

    /// Persists a new record, assigning identity and timestamps.
    async fn insert(&self, draft: &BeerDraft) -> DbResult<Beer>;

    /// Overwrites the body of an existing record. `None` if `id` is absent;
    /// never inserts.
    async fn replace(&self, id: BeerId, draft: &BeerDraft) -> DbResult<Option<Beer>>;

    /// Removes a record. `false` if `id` was absent.
    async fn delete(&self, id: BeerId) -> DbResult<bool>;
}

//! # Beer Service
//!
//! The listing and mutation engine. Every operation is a short async
//! sequence of store calls; no locks, no caches.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ListingQuery { name, style, page, size, show_inventory }              │
//! │       │                                                                 │
//! │       ├── PageRequest::clamp(page, size, bounds)                       │
//! │       ├── filter::resolve_with(name, style, name_match)                │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐           │
//! │  │ store.scan(c, off, size) │   │ store.count(c)           │           │
//! │  │   .try_collect()         │   │                          │           │
//! │  └────────────┬─────────────┘   └────────────┬─────────────┘           │
//! │               └──────── tokio::try_join! ────┘                         │
//! │                         (either fails → Err)                           │
//! │       ▼                                                                 │
//! │  PageResult::assemble(content, request, total)                         │
//! │       ▼                                                                 │
//! │  .map(BeerDto::from_beer(_, inventory))                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutations
//! ```text
//! create(dto)      validate ──► insert
//! update(id, dto)  find_by_id ──► None? ──► Ok(None)   (never upserts)
//!                             └─► validate against stored ──► replace
//! delete(id)       delete ──► Deleted | NotFound
//! ```
//!
//! The read in `update` and the write that follows are separate store calls.
//! A concurrent delete in between makes the replace match nothing, which is
//! reported as not found. There is no optimistic concurrency control.

use futures_util::TryStreamExt;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use brewery_core::filter::{self, FilterCriteria, NameMatch};
use brewery_core::page::{PageBounds, PageRequest, PageResult};
use brewery_core::{Beer, BeerDto, BeerId, BeerStyle, DeleteOutcome, Inventory};
use brewery_db::{BeerStore, DbError};

use crate::config::{ConfigError, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};

// =============================================================================
// Listing Query
// =============================================================================

/// Raw listing parameters as they arrive from the handler layer.
///
/// Nothing here is validated: page parameters are clamped and a blank name
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQuery {
    #[serde(default, alias = "beerName")]
    pub name: Option<String>,

    #[serde(default, alias = "beerStyle")]
    pub style: Option<BeerStyle>,

    #[serde(default, alias = "pageNumber")]
    pub page: Option<i64>,

    #[serde(default, alias = "pageSize")]
    pub size: Option<i64>,

    #[serde(default)]
    pub show_inventory: bool,
}

impl ListingQuery {
    /// Unfiltered first page with the default size.
    pub fn all() -> Self {
        ListingQuery::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn style(mut self, style: BeerStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn page(mut self, page: i64, size: i64) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn show_inventory(mut self, show: bool) -> Self {
        self.show_inventory = show;
        self
    }
}

// =============================================================================
// Beer Service
// =============================================================================

/// The engine, generic over its record store.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(config.db_config()).await?;
/// let service = BeerService::new(db.beers()).with_config(&config)?;
///
/// let page = service.listing(ListingQuery::all().style(BeerStyle::Wheat)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct BeerService<S> {
    store: S,
    bounds: PageBounds,
    name_match: NameMatch,
}

impl<S: BeerStore> BeerService<S> {
    /// Creates a service with default page bounds and exact name matching.
    pub fn new(store: S) -> Self {
        BeerService {
            store,
            bounds: PageBounds::default(),
            name_match: NameMatch::Exact,
        }
    }

    /// Applies page bounds and name match mode from configuration.
    pub fn with_config(self, config: &ServiceConfig) -> Result<Self, ConfigError> {
        Ok(self
            .page_bounds(config.page_bounds()?)
            .name_match(config.name_match))
    }

    pub fn page_bounds(mut self, bounds: PageBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn name_match(mut self, mode: NameMatch) -> Self {
        self.name_match = mode;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Resolves, clamps, pages and projects a listing request.
    ///
    /// Zero matches is `Ok` with empty content. `Err` only on store failure.
    pub async fn listing(&self, query: ListingQuery) -> ServiceResult<PageResult<BeerDto>> {
        let request = PageRequest::clamp(query.page, query.size, self.bounds);
        if query.page.is_some_and(|page| page != request.page())
            || query.size.is_some_and(|size| size != request.size())
        {
            warn!(
                page = ?query.page,
                size = ?query.size,
                clamped_page = request.page(),
                clamped_size = request.size(),
                "Clamped page request"
            );
        }

        let criteria = filter::resolve_with(query.name.as_deref(), query.style, self.name_match);
        let inventory = Inventory::from(query.show_inventory);

        let page = self.list(&criteria, request).await?;
        Ok(page.map(|beer| BeerDto::from_beer(beer, inventory)))
    }

    /// Assembles one page from a bounded scan and a count, run concurrently.
    ///
    /// The page is built only after both complete. If either fails the whole
    /// call fails; a partial page is never returned. A write landing between
    /// the two may be counted but not listed, or the reverse.
    pub async fn list(
        &self,
        criteria: &FilterCriteria,
        request: PageRequest,
    ) -> ServiceResult<PageResult<Beer>> {
        debug!(
            plan = criteria.plan(),
            page = request.page(),
            size = request.size(),
            "Listing beers"
        );

        // The scan is drained to its end so its connection goes back to the
        // pool; the page bound is applied afterwards.
        let scan = self
            .store
            .scan(criteria, request.offset(), request.size())
            .try_collect::<Vec<Beer>>();
        let count = self.store.count(criteria);

        let (mut content, total) = tokio::try_join!(scan, count).map_err(surface)?;
        content.truncate(request.size() as usize);

        Ok(PageResult::assemble(content, request, total))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Fetches a beer by id, optionally without inventory detail.
    pub async fn get_by_id(&self, id: BeerId, inventory: Inventory) -> ServiceResult<Option<Beer>> {
        let beer = self.store.find_by_id(id).await.map_err(surface)?;

        Ok(beer.map(|beer| match inventory {
            Inventory::Include => beer,
            Inventory::Omit => beer.without_inventory(),
        }))
    }

    /// Fetches a beer by UPC.
    pub async fn get_by_upc(&self, upc: &str) -> ServiceResult<Option<Beer>> {
        self.store.find_by_upc(upc.trim()).await.map_err(surface)
    }

    /// [`get_by_id`](Self::get_by_id), projected to a DTO.
    pub async fn by_id(&self, id: BeerId, include_inventory: bool) -> ServiceResult<Option<BeerDto>> {
        let inventory = Inventory::from(include_inventory);
        let beer = self.get_by_id(id, inventory).await?;
        Ok(beer.map(|beer| BeerDto::from_beer(beer, inventory)))
    }

    /// [`get_by_upc`](Self::get_by_upc), projected to a DTO.
    pub async fn by_upc(&self, upc: &str) -> ServiceResult<Option<BeerDto>> {
        Ok(self.get_by_upc(upc).await?.map(BeerDto::from))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Validates and inserts a new beer.
    ///
    /// Validation always runs here, whether or not the handler layer already
    /// checked the payload. A duplicate UPC fails as a validation error.
    pub async fn create(&self, dto: BeerDto) -> ServiceResult<BeerDto> {
        let draft = dto.to_draft().map_err(|e| {
            debug!(error = %e, "Rejected create payload");
            ServiceError::from(e)
        })?;

        let beer = self.store.insert(&draft).await.map_err(surface)?;

        info!(id = beer.id, upc = %beer.upc, "Created beer");
        Ok(BeerDto::from(beer))
    }

    /// Replaces the mutable fields of an existing beer.
    ///
    /// ## Returns
    /// * `Ok(Some(dto))` - updated record
    /// * `Ok(None)` - no beer with that id; nothing was created
    ///
    /// The stored UPC is kept whatever the payload says. A payload without
    /// `quantityOnHand` keeps the stored quantity.
    pub async fn update(&self, id: BeerId, dto: BeerDto) -> ServiceResult<Option<BeerDto>> {
        let Some(existing) = self.store.find_by_id(id).await.map_err(surface)? else {
            warn!(id, "Update target not found");
            return Ok(None);
        };

        let replacement = dto.to_replacement(&existing)?;

        match self.store.replace(id, &replacement).await.map_err(surface)? {
            Some(updated) => {
                info!(id, "Updated beer");
                Ok(Some(BeerDto::from(updated)))
            }
            None => {
                warn!(id, "Update target removed before write");
                Ok(None)
            }
        }
    }

    /// Deletes a beer.
    ///
    /// The existence check and the removal are one conditional store write,
    /// so a second delete of the same id always reports `NotFound`.
    pub async fn delete(&self, id: BeerId) -> ServiceResult<DeleteOutcome> {
        let outcome = DeleteOutcome::from(self.store.delete(id).await.map_err(surface)?);

        match outcome {
            DeleteOutcome::Deleted => info!(id, "Deleted beer"),
            DeleteOutcome::NotFound => warn!(id, "Delete target not found"),
        }
        Ok(outcome)
    }

    /// Liveness probe: one cheap store round trip.
    pub async fn ping(&self) -> ServiceResult<()> {
        self.store
            .count(&FilterCriteria::All)
            .await
            .map(|_| ())
            .map_err(surface)
    }
}

/// Converts a store error, logging the ones that are real failures.
fn surface(err: DbError) -> ServiceError {
    let err = ServiceError::from(err);
    if let ServiceError::StoreUnavailable(source) = &err {
        error!(error = %source, "Record store call failed");
    }
    err
}

// =============================================================================
// Unit Tests
// =============================================================================

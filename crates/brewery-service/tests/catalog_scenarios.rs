//! End-to-end catalog scenarios against an in-memory SQLite store.

use brewery_core::filter::resolve;
use brewery_core::page::PageRequest;
use brewery_core::{BeerDto, BeerStyle, DeleteOutcome};
use brewery_db::{BeerRepository, BeerStore, Database, DbConfig};
use brewery_service::{BeerService, ListingQuery};

async fn service() -> BeerService<BeerRepository> {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    BeerService::new(db.beers())
}

fn beer(name: &str, style: &str, upc: &str, price: &str, quantity: i64) -> BeerDto {
    BeerDto {
        beer_name: Some(name.to_string()),
        beer_style: Some(style.to_string()),
        upc: Some(upc.to_string()),
        price: Some(price.to_string()),
        quantity_on_hand: Some(quantity),
        ..BeerDto::default()
    }
}

/// 4 WHEAT beers and 10 others.
async fn load_catalog(service: &BeerService<BeerRepository>) {
    let catalog = [
        ("Galaxy Cat", "WHEAT"),
        ("Mango Bobs", "ALE"),
        ("Pinball Porter", "PORTER"),
        ("Golden Budda", "STOUT"),
        ("Cage Blond", "WHEAT"),
        ("Amarillo", "LAGER"),
        ("King Krush", "IPA"),
        ("Static IPA", "IPA"),
        ("Grand Gose", "GOSE"),
        ("Sunny Porch", "WHEAT"),
        ("Farmhouse", "SAISON"),
        ("Crisp Town", "PILSNER"),
        ("Hazy Pale", "PALE_ALE"),
        ("Blessed Wheat", "WHEAT"),
    ];

    for (i, (name, style)) in catalog.iter().enumerate() {
        service
            .create(beer(name, style, &format!("06312342{:05}", i), "10.00", 10 + i as i64))
            .await
            .unwrap();
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn create_then_lookup_by_upc() {
    let service = service().await;

    let created = service
        .create(beer("Galaxy Cat", "WHEAT", "0631234200036", "12.50", 48))
        .await
        .unwrap();
    let id = created.id.expect("id assigned on create");

    let found = service.by_upc("0631234200036").await.unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.beer_name.as_deref(), Some("Galaxy Cat"));
    assert_eq!(found.beer_style.as_deref(), Some("WHEAT"));
    assert_eq!(found.price.as_deref(), Some("12.50"));
    assert!(found.created_date.is_some());
    assert!(found.last_modified_date.is_some());
}

#[tokio::test]
async fn style_filter_returns_single_page_of_matches() {
    let service = service().await;
    load_catalog(&service).await;

    let page = service
        .listing(ListingQuery::all().style(BeerStyle::Wheat).page(0, 25))
        .await
        .unwrap();

    assert_eq!(page.content().len(), 4);
    assert_eq!(page.total_elements(), 4);
    assert_eq!(page.total_pages(), 1);
    assert!(page
        .content()
        .iter()
        .all(|dto| dto.beer_style.as_deref() == Some("WHEAT")));
}

#[tokio::test]
async fn update_of_unknown_id_creates_nothing() {
    let service = service().await;
    load_catalog(&service).await;

    let outcome = service
        .update(999, beer("Ghost", "ALE", "0000000000000", "1.00", 1))
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert!(service.by_id(999, true).await.unwrap().is_none());
    assert_eq!(
        service.listing(ListingQuery::all()).await.unwrap().total_elements(),
        14
    );
}

#[tokio::test]
async fn inventory_is_shown_only_on_request() {
    let service = service().await;
    let created = service
        .create(beer("Galaxy Cat", "WHEAT", "0631234200036", "12.50", 48))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let without = service.by_id(id, false).await.unwrap().unwrap();
    assert_eq!(without.quantity_on_hand, None);
    let json = serde_json::to_value(&without).unwrap();
    assert!(json.get("quantityOnHand").is_none());

    let with = service.by_id(id, true).await.unwrap().unwrap();
    assert_eq!(with.quantity_on_hand, Some(48));
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn page_sizes_partition_the_matching_set() {
    let service = service().await;
    load_catalog(&service).await;

    for criteria in [
        resolve(None, None),
        resolve(None, Some(BeerStyle::Wheat)),
        resolve(None, Some(BeerStyle::Ipa)),
        resolve(Some("Galaxy Cat"), None),
        resolve(Some("Galaxy Cat"), Some(BeerStyle::Ipa)),
    ] {
        let total = service.store().count(&criteria).await.unwrap();

        for size in [1, 3, 5, 14, 100] {
            let first = service
                .list(&criteria, PageRequest::new(Some(0), Some(size)))
                .await
                .unwrap();
            let mut listed = 0;

            for index in 0..first.total_pages() + 2 {
                let page = service
                    .list(&criteria, PageRequest::new(Some(index), Some(size)))
                    .await
                    .unwrap();

                assert!(page.content().len() as i64 <= size);
                assert_eq!(page.total_elements(), total);
                if index >= page.total_pages() {
                    assert!(page.is_empty());
                }
                listed += page.content().len() as i64;
            }

            assert_eq!(listed, total, "plan {} size {}", criteria.plan(), size);
        }
    }
}

#[tokio::test]
async fn name_and_style_filters_combine_with_and() {
    let service = service().await;
    load_catalog(&service).await;

    let both = service
        .listing(ListingQuery::all().name("Galaxy Cat").style(BeerStyle::Wheat))
        .await
        .unwrap();
    assert_eq!(both.total_elements(), 1);

    let none = service
        .listing(ListingQuery::all().name("Galaxy Cat").style(BeerStyle::Stout))
        .await
        .unwrap();
    assert!(none.is_empty());
    assert_eq!(none.total_pages(), 0);
}

#[tokio::test]
async fn upc_survives_update() {
    let service = service().await;
    let created = service
        .create(beer("Galaxy Cat", "WHEAT", "0631234200036", "12.50", 48))
        .await
        .unwrap();
    let id = created.id.unwrap();

    service
        .update(id, beer("Galaxy Cat", "WHEAT", "1111111111111", "12.50", 48))
        .await
        .unwrap()
        .unwrap();

    let stored = service.by_id(id, true).await.unwrap().unwrap();
    assert_eq!(stored.upc.as_deref(), Some("0631234200036"));
    assert!(service.by_upc("1111111111111").await.unwrap().is_none());
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let service = service().await;
    let created = service
        .create(beer("Galaxy Cat", "WHEAT", "0631234200036", "12.50", 48))
        .await
        .unwrap();
    let id = created.id.unwrap();

    assert!(service.delete(id).await.unwrap().is_deleted());
    assert_eq!(service.delete(id).await.unwrap(), DeleteOutcome::NotFound);
    assert!(service.by_id(id, true).await.unwrap().is_none());
}

#[tokio::test]
async fn create_rejects_incomplete_payloads() {
    let service = service().await;

    for field in ["beerName", "beerStyle", "upc", "price"] {
        let mut payload = beer("Galaxy Cat", "WHEAT", "0631234200036", "12.50", 48);
        match field {
            "beerName" => payload.beer_name = None,
            "beerStyle" => payload.beer_style = None,
            "upc" => payload.upc = None,
            _ => payload.price = None,
        }

        let err = service.create(payload).await.unwrap_err();
        assert!(err.is_validation(), "missing {}", field);
    }

    assert_eq!(
        service.listing(ListingQuery::all()).await.unwrap().total_elements(),
        0
    );
}

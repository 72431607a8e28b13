//! Catalog store flows against the in-memory gateway.

use std::sync::Arc;

use chrono::{Duration, Utc};
use roswell_commerce::gateway::GatewayOperation;
use roswell_commerce::prelude::*;

fn record(id: &str, category: &str, age_days: i64) -> ProductRecord {
    ProductRecord {
        id: ProductId::new(id),
        title: format!("Producto {}", id),
        description: "Descripción".to_string(),
        price: Price::from_units(45999),
        category: category.to_string(),
        sizes: vec!["S".into(), "M".into()],
        colors: vec!["Negro".into()],
        images: vec![
            format!("memory://products/{}-a.jpg", id),
            format!("memory://products/{}-b.jpg", id),
        ],
        in_stock: true,
        featured: false,
        created_at: Utc::now() - Duration::days(age_days),
        updated_at: None,
    }
}

fn draft(title: &str) -> ProductDraft {
    ProductDraft::new(title, "Remera oversize", Price::from_units(34999), "tshirts")
        .with_sizes(["M", "L"])
        .with_colors(["Blanco"])
        .with_images(["memory://products/remera.jpg"])
}

async fn loaded_store(records: Vec<ProductRecord>) -> CatalogStore<InMemoryGateway> {
    let gateway = Arc::new(InMemoryGateway::with_records(records));
    let mut store = CatalogStore::new(gateway);
    store.refresh().await.unwrap();
    store
}

#[tokio::test]
async fn refresh_loads_newest_first_and_normalizes() {
    let store = loaded_store(vec![record("old", "coats", 5), record("new", "jackets", 1)]).await;

    let ids: Vec<&str> = store.products().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
    assert_eq!(store.products()[0].category, Category::Tshirts);
    assert_eq!(store.products()[1].category, Category::Coats);
}

#[tokio::test]
async fn failed_refresh_keeps_last_known_list() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;
    store.gateway().fail_on(GatewayOperation::List);

    let err = store.refresh().await.unwrap_err();
    assert!(matches!(err, CommerceError::Fetch(_)));
    assert_eq!(store.len(), 1);
    assert!(store.last_error().is_some());
    assert!(!store.is_loading());

    store.gateway().recover(GatewayOperation::List);
    store.refresh().await.unwrap();
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn add_persists_and_adopts_server_id() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;

    let product = store.add(draft("Remera Básica")).await.unwrap();

    assert_eq!(store.products()[0].id, product.id);
    assert_eq!(store.len(), 2);
    assert!(store.gateway().record(&product.id).is_some());
}

#[tokio::test]
async fn invalid_draft_never_reaches_gateway() {
    let mut store = loaded_store(vec![]).await;
    let calls_before = store.gateway().calls().len();

    let err = store
        .add(draft("Sin imágenes").with_images(Vec::<String>::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, CommerceError::Validation(_)));
    assert_eq!(err.field_errors()[0].field, "images");
    assert_eq!(store.gateway().calls().len(), calls_before);
    assert!(store.is_empty());
}

#[tokio::test]
async fn duplicate_explicit_id_is_rejected() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;

    let err = store.add(draft("Otra").with_id("1")).await.unwrap_err();
    assert!(matches!(err, CommerceError::DuplicateProduct(_)));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn failed_add_keeps_optimistic_insert() {
    let mut store = loaded_store(vec![]).await;
    store.gateway().fail_on(GatewayOperation::Insert);

    let err = store.add(draft("Remera Offline")).await.unwrap_err();

    assert!(matches!(
        err,
        CommerceError::Write {
            operation: WriteOperation::Add,
            ..
        }
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(store.products()[0].title, "Remera Offline");
    assert!(store.gateway().records().is_empty());
}

#[tokio::test]
async fn update_merges_after_remote_success() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;
    let id = ProductId::new("1");

    let patch = ProductPatch {
        category: Some("jackets".to_string()),
        featured: Some(true),
        ..Default::default()
    };
    store.update(&id, patch).await.unwrap();

    let local = store.get(&id).unwrap();
    assert_eq!(local.category, Category::Tshirts);
    assert!(local.featured);
    assert_eq!(local.title, "Producto 1");

    let remote = store.gateway().record(&id).unwrap();
    assert_eq!(remote.category, "tshirts");
    assert!(remote.featured);
    assert!(remote.updated_at.is_some());
}

#[tokio::test]
async fn update_unknown_id_is_silent() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;

    let patch = ProductPatch {
        featured: Some(true),
        ..Default::default()
    };
    store.update(&ProductId::new("nope"), patch).await.unwrap();

    assert_eq!(store.gateway().call_count(GatewayOperation::Update), 0);
}

#[tokio::test]
async fn failed_update_leaves_local_copy() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;
    store.gateway().fail_on(GatewayOperation::Update);
    let id = ProductId::new("1");

    let patch = ProductPatch {
        title: Some("Nuevo".to_string()),
        ..Default::default()
    };
    assert!(store.update(&id, patch).await.is_err());
    assert_eq!(store.get(&id).unwrap().title, "Producto 1");
}

#[tokio::test]
async fn remove_deletes_record_and_images() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;
    let id = ProductId::new("1");
    store
        .gateway()
        .upload_image(vec![1], "1-a.jpg")
        .await
        .unwrap();

    store.remove(&id).await.unwrap();

    assert!(store.get(&id).is_none());
    assert!(store.gateway().records().is_empty());
    assert!(!store.gateway().has_image("memory://products/1-a.jpg"));
}

#[tokio::test]
async fn remove_survives_image_cleanup_failure() {
    let mut store = loaded_store(vec![record("1", "pants", 1), record("2", "pants", 2)]).await;
    store.gateway().fail_on(GatewayOperation::DeleteImages);
    let id = ProductId::new("1");

    store.remove(&id).await.unwrap();
    assert!(store.get(&id).is_none());

    store.refresh().await.unwrap();
    assert!(store.get(&id).is_none());
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn failed_remove_resyncs_from_gateway() {
    let mut store = loaded_store(vec![record("1", "pants", 1)]).await;
    store.gateway().fail_on(GatewayOperation::Delete);
    let id = ProductId::new("1");

    let err = store.remove(&id).await.unwrap_err();

    assert!(matches!(
        err,
        CommerceError::Write {
            operation: WriteOperation::Delete,
            ..
        }
    ));
    assert!(store.get(&id).is_some());
}

#[tokio::test]
async fn browse_to_checkout() {
    let mut records: Vec<ProductRecord> = (0..10)
        .map(|i| record(&i.to_string(), "hoodies", i))
        .collect();
    records[3].featured = true;
    let store = loaded_store(records).await;

    let query = ProductQuery::new()
        .with_filter(Filter::Category(Category::Hoodies))
        .with_per_page(4)
        .with_page(9);
    let page = query.run(store.products());
    assert_eq!(page.pagination.page, 3);
    assert_eq!(page.len(), 2);

    let featured = store.filter_featured();
    assert_eq!(featured.len(), 1);

    let mut cart = Cart::new();
    cart.add_line(featured[0].clone(), "M", "Negro", 2).unwrap();
    cart.add_line(featured[0].clone(), "M", "Negro", 1).unwrap();
    assert_eq!(cart.total_price().unwrap(), Price::from_units(137997));

    let handoff = CheckoutHandoff::from_cart(&cart, DEFAULT_DESTINATION).unwrap();
    assert!(handoff.message.contains("📦 Cantidad: 3"));
    assert!(handoff.whatsapp_url().starts_with("https://wa.me/543584388196?text="));
}

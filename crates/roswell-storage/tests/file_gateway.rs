//! File gateway behaviour on a scratch directory.

use std::sync::Arc;

use roswell_commerce::gateway::{GatewayError, ProductGateway, ProductRecordPatch};
use roswell_commerce::prelude::*;
use roswell_storage::{FileGateway, Layout};
use tempfile::TempDir;

fn gateway(dir: &TempDir) -> FileGateway {
    FileGateway::new(Layout::new(dir.path(), "/images"))
}

fn draft(title: &str) -> ProductDraft {
    ProductDraft::new(title, "Pantalón cargo", Price::from_units(79999), "pants")
        .with_sizes(["38", "40"])
        .with_colors(["Verde"])
        .with_images(["/placeholder.jpg"])
}

#[tokio::test]
async fn missing_file_is_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let records = gateway(&dir).list_products().await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn products_survive_a_new_gateway() {
    let dir = TempDir::new().unwrap();

    let mut store = CatalogStore::new(Arc::new(gateway(&dir)));
    store.refresh().await.unwrap();
    let first = store.add(draft("Cargo Verde")).await.unwrap();
    let second = store.add(draft("Cargo Negro")).await.unwrap();

    let mut reopened = CatalogStore::new(Arc::new(gateway(&dir)));
    reopened.refresh().await.unwrap();

    let ids: Vec<&ProductId> = reopened.products().iter().map(|p| &p.id).collect();
    assert_eq!(ids, vec![&second.id, &first.id]);
    assert_eq!(reopened.products()[0].category, Category::Pants);
}

#[tokio::test]
async fn update_and_delete_round_trip_through_disk() {
    let dir = TempDir::new().unwrap();
    let mut store = CatalogStore::new(Arc::new(gateway(&dir)));
    let product = store.add(draft("Cargo")).await.unwrap();

    let patch = ProductPatch {
        price: Some(Price::from_units(69999)),
        ..Default::default()
    };
    store.update(&product.id, patch).await.unwrap();
    store.refresh().await.unwrap();
    assert_eq!(
        store.get(&product.id).unwrap().price,
        Price::from_units(69999)
    );

    store.remove(&product.id).await.unwrap();
    store.refresh().await.unwrap();
    assert!(store.is_empty());
}

#[tokio::test]
async fn update_missing_record_is_not_found() {
    let dir = TempDir::new().unwrap();
    let patch = ProductRecordPatch {
        updated_at: chrono::Utc::now(),
        ..Default::default()
    };
    let err = gateway(&dir)
        .update_product(&ProductId::new("missing"), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::NotFound(_)));
}

#[tokio::test]
async fn uploaded_images_are_deleted_with_their_product() {
    let dir = TempDir::new().unwrap();
    let mut store = CatalogStore::new(Arc::new(gateway(&dir)));

    let reference = store
        .upload_image(vec![0xFF, 0xD8, 0xFF], "foto.jpg")
        .await
        .unwrap();
    assert!(reference.starts_with("/images/products/"));

    let name = reference.rsplit('/').next().unwrap();
    let path = dir.path().join("images").join("products").join(name);
    assert!(path.exists());

    let product = store
        .add(draft("Con foto").with_images([reference.clone(), "/placeholder.jpg".to_string()]))
        .await
        .unwrap();
    store.remove(&product.id).await.unwrap();

    assert!(!path.exists());
}

#[tokio::test]
async fn corrupt_file_is_invalid_record() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("products.json"), "{not json").unwrap();

    let err = gateway(&dir).list_products().await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidRecord(_)));
}

#[tokio::test]
async fn upload_refuses_path_traversal() {
    let dir = TempDir::new().unwrap();
    let err = gateway(&dir)
        .upload_image(vec![1], "../escape.jpg")
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Storage(_)));
}

//! In-memory gateway.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use super::{
    GatewayError, GatewayResult, NewProductRecord, ProductGateway, ProductRecord,
    ProductRecordPatch,
};
use crate::ids::ProductId;

/// Gateway call kinds, used for failure injection and call inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatewayOperation {
    List,
    Insert,
    Update,
    Delete,
    UploadImage,
    DeleteImages,
}

#[derive(Default)]
struct State {
    records: Vec<ProductRecord>,
    images: HashMap<String, Vec<u8>>,
    failing: HashSet<GatewayOperation>,
    calls: Vec<GatewayOperation>,
    next_id: u64,
}

/// Gateway backed by process memory.
///
/// Records are kept newest first, like the hosted table returns them.
#[derive(Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
}

impl InMemoryGateway {
    /// Create an empty gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a gateway seeded with records (sorted newest first).
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        let gateway = Self::new();
        gateway.seed(records);
        gateway
    }

    /// Replace the stored records.
    pub fn seed(&self, mut records: Vec<ProductRecord>) {
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.state.lock().records = records;
    }

    /// Make every call of this kind fail with a network error.
    pub fn fail_on(&self, operation: GatewayOperation) {
        self.state.lock().failing.insert(operation);
    }

    /// Stop failing calls of this kind.
    pub fn recover(&self, operation: GatewayOperation) {
        self.state.lock().failing.remove(&operation);
    }

    /// Snapshot of the stored records.
    pub fn records(&self) -> Vec<ProductRecord> {
        self.state.lock().records.clone()
    }

    /// Look up a stored record.
    pub fn record(&self, id: &ProductId) -> Option<ProductRecord> {
        self.state.lock().records.iter().find(|r| &r.id == id).cloned()
    }

    /// Check if an image reference is stored.
    pub fn has_image(&self, reference: &str) -> bool {
        self.state.lock().images.contains_key(reference)
    }

    /// Number of stored images.
    pub fn image_count(&self) -> usize {
        self.state.lock().images.len()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<GatewayOperation> {
        self.state.lock().calls.clone()
    }

    /// Count calls of one kind.
    pub fn call_count(&self, operation: GatewayOperation) -> usize {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| **c == operation)
            .count()
    }

    fn begin(state: &mut State, operation: GatewayOperation) -> GatewayResult<()> {
        state.calls.push(operation);
        if state.failing.contains(&operation) {
            return Err(GatewayError::Network(format!("{:?} unavailable", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductGateway for InMemoryGateway {
    async fn list_products(&self) -> GatewayResult<Vec<ProductRecord>> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::List)?;
        Ok(state.records.clone())
    }

    async fn insert_product(&self, record: NewProductRecord) -> GatewayResult<ProductRecord> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::Insert)?;

        if let Some(id) = &record.id {
            if state.records.iter().any(|r| &r.id == id) {
                return Err(GatewayError::Storage(format!("duplicate key: {}", id)));
            }
        }

        state.next_id += 1;
        let id = ProductId::new(format!("mem-{}", state.next_id));
        let stored = record.into_record(id, Utc::now());

        let position = state
            .records
            .iter()
            .position(|r| r.created_at <= stored.created_at)
            .unwrap_or(state.records.len());
        state.records.insert(position, stored.clone());
        Ok(stored)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        patch: ProductRecordPatch,
    ) -> GatewayResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::Update)?;

        let record = state
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        patch.apply_to(record);
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::Delete)?;

        let before = state.records.len();
        state.records.retain(|r| &r.id != id);
        if state.records.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> GatewayResult<String> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::UploadImage)?;

        let reference = format!("memory://products/{}", file_name);
        state.images.insert(reference.clone(), bytes);
        Ok(reference)
    }

    async fn delete_images(&self, references: &[String]) -> GatewayResult<()> {
        let mut state = self.state.lock();
        Self::begin(&mut state, GatewayOperation::DeleteImages)?;

        for reference in references {
            state.images.remove(reference);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Price;
    use chrono::{Duration, Utc};

    fn new_record(title: &str) -> NewProductRecord {
        NewProductRecord {
            id: None,
            title: title.to_string(),
            description: "desc".to_string(),
            price: Price::from_units(1000),
            category: "tshirts".to_string(),
            sizes: vec!["M".into()],
            colors: vec!["Negro".into()],
            images: vec!["/a.jpg".into()],
            in_stock: true,
            featured: false,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_id_and_orders_newest_first() {
        let gateway = InMemoryGateway::new();
        let mut older = new_record("older");
        older.created_at = Some(Utc::now() - Duration::days(1));

        gateway.insert_product(older).await.unwrap();
        let newer = gateway.insert_product(new_record("newer")).await.unwrap();

        assert!(!newer.id.as_str().is_empty());
        let titles: Vec<String> = gateway
            .list_products()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let gateway = InMemoryGateway::new();
        gateway.fail_on(GatewayOperation::List);
        assert!(matches!(
            gateway.list_products().await,
            Err(GatewayError::Network(_))
        ));

        gateway.recover(GatewayOperation::List);
        assert!(gateway.list_products().await.is_ok());
        assert_eq!(gateway.call_count(GatewayOperation::List), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let gateway = InMemoryGateway::new();
        let id = ProductId::new("missing");
        let patch = ProductRecordPatch {
            updated_at: Utc::now(),
            ..Default::default()
        };
        assert!(matches!(
            gateway.update_product(&id, patch).await,
            Err(GatewayError::NotFound(_))
        ));
        assert!(matches!(
            gateway.delete_product(&id).await,
            Err(GatewayError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_image_lifecycle() {
        let gateway = InMemoryGateway::new();
        let reference = gateway
            .upload_image(vec![1, 2, 3], "1-remera.jpg")
            .await
            .unwrap();
        assert!(gateway.has_image(&reference));

        gateway.delete_images(&[reference.clone()]).await.unwrap();
        assert!(!gateway.has_image(&reference));
        assert_eq!(gateway.image_count(), 0);
    }
}

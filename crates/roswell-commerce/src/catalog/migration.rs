//! Rewriting stored categories that are no longer known.
//!
//! Reading already normalizes unknown categories, but the raw values stay in
//! the table until rewritten. The optional coats fold moves the retired
//! "coats" category into hoodies before the general cleanup runs.

use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};

use crate::catalog::Category;
use crate::error::{CommerceError, WriteOperation};
use crate::gateway::{ProductGateway, ProductRecord, ProductRecordPatch};
use crate::ids::ProductId;

/// One planned category change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRewrite {
    pub id: ProductId,
    pub from: String,
    pub to: Category,
}

/// Outcome of a migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Records moved from coats to hoodies.
    pub folded_coats: usize,
    /// Records with an unknown category rewritten to the default.
    pub normalized: usize,
    /// Every change, in table order.
    pub rewrites: Vec<CategoryRewrite>,
    /// Whether the changes were only planned.
    pub dry_run: bool,
}

/// Category cleanup settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryMigration {
    fold_coats: bool,
}

impl CategoryMigration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also move "coats" products into hoodies.
    pub fn fold_coats(mut self, fold: bool) -> Self {
        self.fold_coats = fold;
        self
    }

    /// Compute the rewrites for a set of stored records.
    pub fn plan(&self, records: &[ProductRecord]) -> Vec<CategoryRewrite> {
        records
            .iter()
            .filter_map(|record| {
                let to = if self.fold_coats && record.category == Category::Coats.as_str() {
                    Category::Hoodies
                } else if !Category::is_known(&record.category) {
                    Category::DEFAULT
                } else {
                    return None;
                };
                Some(CategoryRewrite {
                    id: record.id.clone(),
                    from: record.category.clone(),
                    to,
                })
            })
            .collect()
    }

    /// Plan against the gateway's records and apply unless `dry_run`.
    ///
    /// Stops at the first failed update; earlier updates stay applied.
    #[instrument(skip(self, gateway))]
    pub async fn run<G>(&self, gateway: &G, dry_run: bool) -> Result<MigrationReport, CommerceError>
    where
        G: ProductGateway + ?Sized,
    {
        let records = gateway.list_products().await.map_err(CommerceError::Fetch)?;
        let rewrites = self.plan(&records);

        if !dry_run {
            for rewrite in &rewrites {
                let patch = ProductRecordPatch {
                    category: Some(rewrite.to.as_str().to_string()),
                    updated_at: Utc::now(),
                    ..Default::default()
                };
                gateway
                    .update_product(&rewrite.id, patch)
                    .await
                    .map_err(|source| CommerceError::Write {
                        operation: WriteOperation::Update,
                        source,
                    })?;
            }
        }

        let folded_coats = rewrites
            .iter()
            .filter(|r| r.from == Category::Coats.as_str())
            .count();
        let report = MigrationReport {
            folded_coats,
            normalized: rewrites.len() - folded_coats,
            rewrites,
            dry_run,
        };

        info!(
            folded_coats = report.folded_coats,
            normalized = report.normalized,
            dry_run,
            "Category migration finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryGateway;
    use crate::money::Price;

    fn record(id: &str, category: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: id.to_string(),
            description: "d".to_string(),
            price: Price::from_units(1),
            category: category.to_string(),
            sizes: vec![],
            colors: vec![],
            images: vec![],
            in_stock: true,
            featured: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn records() -> Vec<ProductRecord> {
        vec![
            record("1", "coats"),
            record("2", "jackets"),
            record("3", "hoodies"),
            record("4", "Pants"),
        ]
    }

    #[test]
    fn test_plan_without_fold_keeps_coats() {
        let plan = CategoryMigration::new().plan(&records());
        let ids: Vec<&str> = plan.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4"]);
        assert!(plan.iter().all(|r| r.to == Category::Tshirts));
    }

    #[test]
    fn test_plan_with_fold() {
        let plan = CategoryMigration::new().fold_coats(true).plan(&records());
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].to, Category::Hoodies);
        assert_eq!(plan[0].from, "coats");
    }

    #[tokio::test]
    async fn test_run_rewrites_table() {
        let gateway = InMemoryGateway::with_records(records());
        let report = CategoryMigration::new()
            .fold_coats(true)
            .run(&gateway, false)
            .await
            .unwrap();

        assert_eq!(report.folded_coats, 1);
        assert_eq!(report.normalized, 2);
        assert_eq!(gateway.record(&ProductId::new("1")).unwrap().category, "hoodies");
        assert_eq!(gateway.record(&ProductId::new("2")).unwrap().category, "tshirts");
        assert_eq!(gateway.record(&ProductId::new("4")).unwrap().category, "tshirts");

        let again = CategoryMigration::new().fold_coats(true).run(&gateway, false).await.unwrap();
        assert!(again.rewrites.is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_changes_nothing() {
        let gateway = InMemoryGateway::with_records(records());
        let report = CategoryMigration::new().run(&gateway, true).await.unwrap();

        assert_eq!(report.rewrites.len(), 2);
        assert_eq!(gateway.record(&ProductId::new("2")).unwrap().category, "jackets");
    }
}

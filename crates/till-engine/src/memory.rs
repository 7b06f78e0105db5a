//! # In-Memory Collaborators
//!
//! Mock implementations of [`ProductCatalog`] and [`SaleStore`] backed by
//! plain maps. Used by the engine's own tests and available to
//! downstream integration tests; production deployments plug in real
//! clients instead.

use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use till_core::{EngineError, EngineResult, Product};

use crate::collab::{ProductCatalog, SaleDraft, SaleStore};

// =============================================================================
// Catalog
// =============================================================================

#[derive(Default)]
struct CatalogInner {
    products: HashMap<String, Product>,
    stock: HashMap<String, Decimal>,
}

/// In-memory product catalog keyed by barcode.
#[derive(Default)]
pub struct MemoryCatalog {
    inner: RwLock<CatalogInner>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product together with its available stock.
    pub async fn insert(&self, product: Product, stock: Decimal) {
        let mut inner = self.inner.write().await;
        inner.stock.insert(product.barcode.clone(), stock);
        inner.products.insert(product.barcode.clone(), product);
    }

    /// Overwrites the recorded stock for a barcode.
    pub async fn set_stock(&self, barcode: &str, stock: Decimal) {
        self.inner.write().await.stock.insert(barcode.to_string(), stock);
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn lookup_by_barcode(&self, barcode: &str) -> EngineResult<Product> {
        self.inner
            .read()
            .await
            .products
            .get(barcode)
            .cloned()
            .ok_or_else(|| EngineError::ProductNotFound(barcode.to_string()))
    }

    async fn available_stock(&self, barcode: &str) -> EngineResult<Decimal> {
        let inner = self.inner.read().await;
        if !inner.products.contains_key(barcode) {
            return Err(EngineError::ProductNotFound(barcode.to_string()));
        }
        Ok(inner.stock.get(barcode).copied().unwrap_or(Decimal::ZERO))
    }

    async fn search(&self, query: &str) -> EngineResult<Vec<Product>> {
        let needle = query.trim().to_lowercase();
        let inner = self.inner.read().await;
        let mut hits: Vec<Product> = inner
            .products
            .values()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(hits)
    }
}

// =============================================================================
// Sale Store
// =============================================================================

/// In-memory sale store; keeps every submitted draft for inspection and
/// can be armed to fail the next submission.
#[derive(Default)]
pub struct MemoryStore {
    submitted: RwLock<Vec<(String, SaleDraft)>>,
    fail_message: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the store to fail the next `submit_sale` with `message`.
    /// Subsequent submissions succeed again (one-shot failure).
    pub async fn fail_next(&self, message: &str) {
        *self.fail_message.write().await = Some(message.to_string());
    }

    /// Returns the submitted invoices in submission order.
    pub async fn submitted(&self) -> Vec<(String, SaleDraft)> {
        self.submitted.read().await.clone()
    }
}

#[async_trait]
impl SaleStore for MemoryStore {
    async fn submit_sale(&self, draft: &SaleDraft) -> EngineResult<String> {
        if let Some(message) = self.fail_message.write().await.take() {
            return Err(EngineError::Persistence { message });
        }

        let invoice_id = Uuid::new_v4().to_string();
        self.submitted
            .write()
            .await
            .push((invoice_id.clone(), draft.clone()));
        Ok(invoice_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::Money;

    fn product(barcode: &str, name: &str) -> Product {
        Product {
            product_id: format!("P-{barcode}"),
            barcode: barcode.to_string(),
            name: name.to_string(),
            cost_price: Money::from_minor_units(500),
            mrp_price: Money::from_minor_units(1000),
            wholesale_price: Money::from_minor_units(800),
            discount_price: Money::from_minor_units(900),
            locked_price: Money::from_minor_units(700),
        }
    }

    #[tokio::test]
    async fn test_lookup_and_stock() {
        let catalog = MemoryCatalog::new();
        catalog.insert(product("111", "Milk 1L"), Decimal::from(5)).await;

        let found = catalog.lookup_by_barcode("111").await.unwrap();
        assert_eq!(found.name, "Milk 1L");
        assert_eq!(
            catalog.available_stock("111").await.unwrap(),
            Decimal::from(5)
        );

        assert!(matches!(
            catalog.lookup_by_barcode("999").await,
            Err(EngineError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_matches_by_name() {
        let catalog = MemoryCatalog::new();
        catalog.insert(product("111", "Milk 1L"), Decimal::ONE).await;
        catalog.insert(product("222", "Bread"), Decimal::ONE).await;

        let hits = catalog.search("milk").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].barcode, "111");
    }

    #[tokio::test]
    async fn test_store_failure_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next("connection refused").await;

        let draft = SaleDraft {
            payment: till_core::payment::reconcile(
                Money::from_minor_units(1000),
                till_core::payment::DiscountInput::none(),
                Money::from_minor_units(1000),
                Money::zero(),
                None,
            ),
            items: Vec::new(),
            finalized_at: chrono::Utc::now(),
        };

        assert!(matches!(
            store.submit_sale(&draft).await,
            Err(EngineError::Persistence { .. })
        ));
        assert!(store.submit_sale(&draft).await.is_ok());
        assert_eq!(store.submitted().await.len(), 1);
    }
}

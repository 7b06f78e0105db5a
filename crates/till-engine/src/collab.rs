//! # Collaborator Traits
//!
//! The engine consumes, but does not implement, the product catalog and
//! the sale store. These traits are the seams: the production app plugs
//! its REST/database clients in, tests plug [`crate::memory`] in.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use till_core::{EngineResult, LineItem, PaymentRecord, Product};

/// Product and stock lookups, keyed by barcode.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Resolves a scanned barcode to its catalog product.
    /// Fails with [`till_core::EngineError::ProductNotFound`] on a miss.
    async fn lookup_by_barcode(&self, barcode: &str) -> EngineResult<Product>;

    /// Returns the recorded available stock for a barcode.
    async fn available_stock(&self, barcode: &str) -> EngineResult<Decimal>;

    /// Typeahead search over the catalog. Not required for engine
    /// correctness, only for operator convenience.
    async fn search(&self, query: &str) -> EngineResult<Vec<Product>>;
}

/// Persistence for finalized sales.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Persists a finalized sale and returns the generated invoice id.
    ///
    /// The id comes back in the same response - there is deliberately no
    /// separate "fetch last invoice" call, which would race under
    /// concurrent submissions.
    async fn submit_sale(&self, draft: &SaleDraft) -> EngineResult<String>;
}

/// Everything the sale store needs to persist one finalized invoice:
/// the payment snapshot plus the line items frozen at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    /// Reconciled payment snapshot.
    pub payment: PaymentRecord,

    /// Line items in receipt order, frozen at checkout.
    pub items: Vec<LineItem>,

    /// When the operator confirmed the checkout.
    pub finalized_at: DateTime<Utc>,
}

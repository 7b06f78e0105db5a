//! # Stock Guard
//!
//! The availability check preventing overselling relative to recorded
//! stock. The live stock figure is fetched by the caller (till-engine,
//! via the catalog collaborator) and passed in, so this module stays
//! pure and instantly testable.
//!
//! ## Check Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Operator requests quantity change on a row                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  quantity_in_cart(rows, product_id, exclude_row)                    │
//! │       │        Σ quantity over other rows of the same product       │
//! │       ▼                                                             │
//! │  already_in_cart + requested > available ?                          │
//! │       │                                                             │
//! │       ├── yes → InsufficientStock { available, already_in_cart }    │
//! │       └── no  → Ok                                                  │
//! │                                                                     │
//! │  Rows with a negative rate never reach this check: they are         │
//! │  pre-validated returns and their quantity is forced negative.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The check is advisory-blocking: on failure the caller must leave (or
//! restore) the row at its pre-edit values; partial writes never land.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::types::LineItem;

/// Sums the quantity of `product_id` across the current rows, excluding
/// the row under edit (if any). Return rows participate with their
/// negative quantities, releasing stock back to the invoice.
pub fn quantity_in_cart(
    rows: &[LineItem],
    product_id: &str,
    exclude_row: Option<usize>,
) -> Decimal {
    rows.iter()
        .enumerate()
        .filter(|(idx, row)| {
            Some(*idx) != exclude_row && row.product_id.as_deref() == Some(product_id)
        })
        .map(|(_, row)| row.quantity)
        .sum()
}

/// Checks whether `requested` units of `product_id` fit within
/// `available` stock, given what the invoice already holds.
///
/// `requested` is the target quantity for the row being added or edited,
/// not a delta: an edit from 4 to 10 passes 10 here and excludes its own
/// row via `exclude_row`.
pub fn check_quantity(
    product_id: &str,
    requested: Decimal,
    available: Decimal,
    rows: &[LineItem],
    exclude_row: Option<usize>,
) -> EngineResult<()> {
    let already_in_cart = quantity_in_cart(rows, product_id, exclude_row);

    if already_in_cart + requested > available {
        return Err(EngineError::InsufficientStock {
            product_id: product_id.to_string(),
            available,
            already_in_cart,
            requested,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

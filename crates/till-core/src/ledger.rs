//! # Line-Item Ledger
//!
//! The in-progress cart of line items for the current invoice: an ordered
//! row list (insertion order is display and receipt order) plus the pure
//! totals derivation.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Ledger Operations                               │
//! │                                                                     │
//! │  Operator Action          Operation              Row Change         │
//! │  ───────────────          ─────────              ──────────         │
//! │  Scan barcode ──────────► scan() ──────────────► merge or append    │
//! │  Submit other item ─────► add_other_item() ────► append             │
//! │  Submit return ─────────► add_return() ────────► append (negated)   │
//! │  Edit quantity ─────────► apply_quantity() ────► in-place rewrite   │
//! │  Edit rate ─────────────► set_rate() ──────────► in-place rewrite   │
//! │  Remove row ────────────► delete_row() ────────► remove             │
//! │  Close bill ────────────► clear() ─────────────► empty              │
//! │                                                                     │
//! │  totals() is recomputed from the row set after every mutation -     │
//! │  there is no cached aggregate to fall out of sync.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock checks live in [`crate::stock`] and are run by the session layer
//! before/around these mutations; the ledger itself stays pure.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::money::Money;
use crate::types::{LedgerTotals, LineItem, LineKind, Product};
use crate::MAX_LEDGER_ROWS;

/// Pre-edit snapshot of a row's mutable figures, taken before a quantity
/// write so a failed stock check can restore the row exactly.
#[derive(Debug, Clone, Copy)]
pub struct QuantitySnapshot {
    pub quantity: Decimal,
    pub amount: Money,
}

/// The ordered line-item ledger for one invoice.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    rows: Vec<LineItem>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger { rows: Vec::new() }
    }

    /// Read access to the rows, in display/receipt order.
    pub fn rows(&self) -> &[LineItem] {
        &self.rows
    }

    /// Number of rows (returns included).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Checks if the ledger has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Records a barcode scan at the given resolved rate.
    ///
    /// Merge-on-scan: if a sale row for the same barcode already exists
    /// its quantity goes up by one; otherwise a new row is appended with
    /// quantity 1. Returns the affected row index.
    ///
    /// The caller has already run the stock guard for the post-scan
    /// quantity.
    pub fn scan(&mut self, product: &Product, rate: Money) -> EngineResult<usize> {
        let existing = self.rows.iter().position(|row| {
            row.kind == LineKind::NewSale && row.barcode.as_deref() == Some(&product.barcode)
        });

        if let Some(idx) = existing {
            let row = &mut self.rows[idx];
            row.quantity += Decimal::ONE;
            row.recompute_amount();
            return Ok(idx);
        }

        self.check_capacity()?;

        let mut row = LineItem {
            product_id: Some(product.product_id.clone()),
            barcode: Some(product.barcode.clone()),
            name: product.name.clone(),
            cost: product.cost_price,
            mrp: product.mrp_price,
            discount: product.mrp_price - rate,
            rate,
            quantity: Decimal::ONE,
            amount: Money::zero(),
            kind: LineKind::NewSale,
        };
        row.recompute_amount();
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Appends a free-text "other" item.
    ///
    /// The entered rate must not exceed the entered MRP; the per-unit
    /// discount is derived as `mrp - rate`.
    pub fn add_other_item(
        &mut self,
        name: &str,
        cost: Money,
        mrp: Money,
        rate: Money,
        quantity: Decimal,
    ) -> EngineResult<usize> {
        if rate > mrp {
            return Err(EngineError::RateExceedsMrp { rate, mrp });
        }
        self.check_capacity()?;

        let mut row = LineItem {
            product_id: None,
            barcode: None,
            name: name.to_string(),
            cost,
            mrp,
            discount: mrp - rate,
            rate,
            quantity,
            amount: Money::zero(),
            kind: LineKind::OtherItem,
        };
        row.recompute_amount();
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Appends a customer return for a catalog product.
    ///
    /// All monetary fields and the quantity are stored as negated
    /// magnitudes; per convention the per-unit discount is
    /// `-(mrp - sale_rate)`. Returns bypass the stock guard.
    pub fn add_return(
        &mut self,
        product: &Product,
        sale_rate: Money,
        quantity: Decimal,
    ) -> EngineResult<usize> {
        self.check_capacity()?;

        let sale_rate = sale_rate.abs();
        let mut row = LineItem {
            product_id: Some(product.product_id.clone()),
            barcode: Some(product.barcode.clone()),
            name: product.name.clone(),
            cost: -product.cost_price.abs(),
            mrp: product.mrp_price,
            discount: -(product.mrp_price - sale_rate),
            rate: -sale_rate,
            quantity: -quantity.abs(),
            amount: Money::zero(),
            kind: LineKind::Return,
        };
        row.recompute_amount();
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    /// Writes a new quantity to a row and returns the pre-edit snapshot.
    ///
    /// The session layer runs the stock guard *after* this optimistic
    /// write (the guard excludes the edited row, so the result is the
    /// same either side) and calls [`Ledger::restore`] with the snapshot
    /// if the guard refuses.
    pub fn apply_quantity(
        &mut self,
        row_index: usize,
        quantity: Decimal,
    ) -> EngineResult<QuantitySnapshot> {
        let row = self
            .rows
            .get_mut(row_index)
            .ok_or(EngineError::RowNotFound(row_index))?;

        let snapshot = QuantitySnapshot {
            quantity: row.quantity,
            amount: row.amount,
        };
        row.quantity = quantity;
        row.recompute_amount();
        Ok(snapshot)
    }

    /// Restores a row to its pre-edit snapshot after a refused write.
    pub fn restore(&mut self, row_index: usize, snapshot: QuantitySnapshot) {
        if let Some(row) = self.rows.get_mut(row_index) {
            row.quantity = snapshot.quantity;
            row.amount = snapshot.amount;
        }
    }

    /// Overwrites a row's unit rate with an operator-entered value.
    ///
    /// The per-unit discount is re-derived from the row's MRP and the
    /// amount recomputed. A negative rate turns the row return-flavored
    /// (quantity sign forced negative). Band validation happens in
    /// [`crate::pricing`] before this is called.
    pub fn set_rate(&mut self, row_index: usize, rate: Money) -> EngineResult<()> {
        let row = self
            .rows
            .get_mut(row_index)
            .ok_or(EngineError::RowNotFound(row_index))?;

        row.rate = rate;
        row.discount = row.mrp - rate;
        row.recompute_amount();
        Ok(())
    }

    /// Removes a row unconditionally. Confirmation is a UI concern.
    pub fn delete_row(&mut self, row_index: usize) -> EngineResult<LineItem> {
        if row_index >= self.rows.len() {
            return Err(EngineError::RowNotFound(row_index));
        }
        Ok(self.rows.remove(row_index))
    }

    /// Empties the ledger. Used by "Close Bill" and after a successful
    /// checkout submission.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Derives the aggregate totals from the current row set.
    ///
    /// Return rows count toward `total_amount` only; the quantity,
    /// discount and item-count aggregates cover sale rows (rows with
    /// non-negative discount and quantity). This asymmetry is the
    /// documented display convention, not an accident.
    pub fn totals(&self) -> LedgerTotals {
        let mut totals = LedgerTotals::empty();

        for row in &self.rows {
            totals.total_amount += row.amount;

            if row.discount >= Money::zero() && row.quantity >= Decimal::ZERO {
                totals.total_quantity += row.quantity;
                totals.total_discount += row.discount.multiply_quantity(row.quantity);
                totals.item_count += 1;
            }
        }

        totals
    }

    fn check_capacity(&self) -> EngineResult<()> {
        if self.rows.len() >= MAX_LEDGER_ROWS {
            return Err(EngineError::LedgerFull {
                max: MAX_LEDGER_ROWS,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
